//! End-to-end runs of the strategy pipeline.

use lacework_core::{CandidateSet, Cell, CellContent, SolvingState, translate};
use lacework_engine::{
    CandidateStore, SolverState, StrategySolver,
    strategy::{NakedSet, StrategyEntry},
};

const SOLVABLE: &str =
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn solvable_puzzle_reaches_solved() {
    init_logs();
    let grid = translate::parse_line(SOLVABLE);
    let mut solver = StrategySolver::from_grid(&grid);

    let state = solver.solve().expect("no contradiction on a valid puzzle");

    assert_eq!(state, SolverState::Solved);
    assert_eq!(solver.state(), SolverState::Solved);
    assert!(solver.grid().is_complete());
    assert!(!solver.log().is_empty());
    for step in solver.log() {
        assert!(!step.changes.is_empty());
        let report = step.report.as_ref().expect("reports are built outside fast mode");
        assert!(!report.description.is_empty());
    }
}

#[test]
fn fast_mode_solves_without_reports() {
    init_logs();
    let grid = translate::parse_line(SOLVABLE);
    let mut solver = StrategySolver::from_grid(&grid);
    solver.set_fast_mode(true);

    assert_eq!(solver.solve().unwrap(), SolverState::Solved);
    for step in solver.log() {
        assert!(step.report.is_none());
    }
}

#[test]
fn identical_runs_take_identical_steps() {
    let grid = translate::parse_line(SOLVABLE);
    let mut first = StrategySolver::from_grid(&grid);
    let mut second = StrategySolver::from_grid(&grid);

    first.solve().unwrap();
    second.solve().unwrap();

    assert_eq!(first.log().len(), second.log().len());
    for (a, b) in first.log().iter().zip(second.log()) {
        assert_eq!(a.strategy, b.strategy);
        assert_eq!(a.changes, b.changes);
    }
}

#[test]
fn blank_grid_gets_stuck_without_progress() {
    let grid = translate::parse_line("");
    let mut solver = StrategySolver::from_grid(&grid);

    assert_eq!(solver.solve().unwrap(), SolverState::Stuck);
    assert!(solver.log().is_empty());
}

#[test]
fn naked_pair_strips_its_row() {
    // Two cells of row 1 restricted to {4, 7}
    let mut state = SolvingState::blank();
    for cell in Cell::all() {
        state.set(cell, CellContent::Candidates(CandidateSet::CLASSIC));
    }
    let pair = CandidateSet::from_iter([4, 7]);
    state.set(Cell::new(0, 0), CellContent::Candidates(pair));
    state.set(Cell::new(0, 1), CellContent::Candidates(pair));

    let mut solver = StrategySolver::with_strategies(
        CandidateStore::from_state(&state),
        vec![StrategyEntry::new(Box::new(NakedSet::pair()))],
    );

    assert!(solver.step().unwrap());
    let step = &solver.log()[0];
    assert_eq!(step.strategy, "Naked Pair");
    assert_eq!(step.changes.len(), 14);
    for change in &step.changes {
        let cp = change.possibility();
        assert_eq!(cp.cell.row, 0);
        assert!(pair.contains(cp.digit));
    }
    // One pass of a single strategy cannot finish the puzzle
    assert!(!solver.grid().is_complete());
}

#[test]
fn every_possible_next_step_offers_choices() {
    let grid = translate::parse_line(SOLVABLE);
    let mut solver = StrategySolver::from_grid(&grid);

    let steps = solver.every_possible_next_step();
    assert!(!steps.is_empty());

    // Applying the first offered step makes real progress and logs it
    let before = solver.snapshot();
    let first = steps.into_iter().next().unwrap();
    assert!(solver.apply_commit(first).unwrap());
    assert_eq!(solver.log().len(), 1);
    assert_ne!(solver.snapshot(), before);
}
