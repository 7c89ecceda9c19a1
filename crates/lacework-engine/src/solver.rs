//! The strategy pipeline and its session state.

use lacework_core::{CellPossibility, Grid, SolvingState};
use log::{debug, info};

use crate::{
    buffer::{ChangeBuffer, ChangeCommit, ReportBuilder, SolverChange, StepReport},
    error::SolverError,
    graph::{ConstructRules, LinkGraph},
    inference::SearchContext,
    store::CandidateStore,
    strategy::{self, CommitPolicy, StrategyEntry},
};

/// Computations cached between store mutations.
///
/// The link graph remembers which construction rules it carries, so
/// consecutive strategies with overlapping needs share one build. Any
/// applied change invalidates the whole cache.
#[derive(Debug, Default)]
struct Precomputer {
    graph: LinkGraph,
}

impl Precomputer {
    fn clear(&mut self) {
        self.graph.clear();
    }
}

/// The state one solve runs on: the candidate store, the change buffer
/// and the precomputed caches.
#[derive(Debug)]
pub struct SolverSession {
    store: CandidateStore,
    buffer: ChangeBuffer,
    precomputer: Precomputer,
    stop_on_first: bool,
}

impl SolverSession {
    /// Creates a session over `store`.
    #[must_use]
    pub fn new(store: CandidateStore) -> Self {
        Self {
            store,
            buffer: ChangeBuffer::new(),
            precomputer: Precomputer::default(),
            stop_on_first: true,
        }
    }

    /// The candidate store strategies read.
    #[must_use]
    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Proposes placing a digit.
    pub fn propose_assignment(&mut self, possibility: CellPossibility) {
        self.buffer.propose_assignment(&self.store, possibility);
    }

    /// Proposes removing a candidate.
    pub fn propose_elimination(&mut self, possibility: CellPossibility) {
        self.buffer.propose_elimination(&self.store, possibility);
    }

    /// Commits the pending changes under `builder`.
    ///
    /// Returns `true` when the strategy should stop searching: changes
    /// were pending and the active commit policy wants only the first
    /// finding.
    pub fn commit(&mut self, builder: Box<dyn ReportBuilder>) -> bool {
        if !self.buffer.not_empty() {
            return false;
        }
        self.buffer.commit(builder);
        self.stop_on_first
    }

    /// Drains the commits recorded so far.
    #[must_use]
    pub fn take_commits(&mut self) -> Vec<ChangeCommit> {
        self.buffer.take_commits()
    }

    /// Builds the link graph for `rules` and returns it together with a
    /// search context over this session.
    pub fn search_parts(&mut self, rules: ConstructRules) -> (&LinkGraph, SearchContext<'_>) {
        self.precomputer.graph.construct(rules, &self.store);
        (
            &self.precomputer.graph,
            SearchContext {
                store: &self.store,
                buffer: &mut self.buffer,
                stop_on_first: self.stop_on_first,
            },
        )
    }
}

/// The observable state of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolverState {
    /// No strategy has run yet.
    Idle,
    /// The strategy at this pipeline index is running.
    Running(usize),
    /// Every cell is placed.
    Solved,
    /// No enabled strategy makes progress.
    Stuck,
}

/// One applied and logged solving step.
#[derive(Debug)]
pub struct SolvingStep {
    /// The strategy that found the step.
    pub strategy: &'static str,
    /// The changes that were actually applied.
    pub changes: Vec<SolverChange>,
    /// The compiled report, absent in fast mode.
    pub report: Option<StepReport>,
    /// The full state the step was found on.
    pub state_before: SolvingState,
}

/// A step the pipeline could take next, not yet applied.
#[derive(Debug)]
pub struct PossibleStep {
    /// The strategy that found the step.
    pub strategy: &'static str,
    /// The frozen commit.
    pub commit: ChangeCommit,
}

/// Runs strategies in order, restarting from the easiest after every
/// applied change.
///
/// A strategy that commits nothing passes the turn to the next one. A
/// strategy that commits gets its changes applied and logged, then the
/// pipeline restarts from index zero, so harder strategies only ever run
/// on states the easier ones are done with. The pipeline stops at
/// [`SolverState::Solved`] or [`SolverState::Stuck`].
#[derive(Debug)]
pub struct StrategySolver {
    entries: Vec<StrategyEntry>,
    session: SolverSession,
    log: Vec<SolvingStep>,
    state: SolverState,
}

impl StrategySolver {
    /// Creates a solver over `grid` with the default pipeline.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        Self::with_strategies(CandidateStore::from_grid(grid), strategy::default_pipeline())
    }

    /// Creates a solver over an explicit per-cell state with the default
    /// pipeline.
    #[must_use]
    pub fn from_state(state: &SolvingState) -> Self {
        Self::with_strategies(CandidateStore::from_state(state), strategy::default_pipeline())
    }

    /// Creates a solver with a custom pipeline.
    #[must_use]
    pub fn with_strategies(store: CandidateStore, entries: Vec<StrategyEntry>) -> Self {
        Self {
            entries,
            session: SolverSession::new(store),
            log: Vec::new(),
            state: SolverState::Idle,
        }
    }

    /// The current pipeline state.
    #[must_use]
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// The applied steps, oldest first.
    #[must_use]
    pub fn log(&self) -> &[SolvingStep] {
        &self.log
    }

    /// The placed-digit layer of the current state.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.session.store.grid()
    }

    /// A full snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SolvingState {
        self.session.store.snapshot()
    }

    /// The configured strategies in pipeline order.
    #[must_use]
    pub fn entries(&self) -> &[StrategyEntry] {
        &self.entries
    }

    /// Mutable access to the pipeline configuration.
    pub fn entries_mut(&mut self) -> &mut [StrategyEntry] {
        &mut self.entries
    }

    /// Switches fast mode, which skips reports and commit records.
    pub fn set_fast_mode(&mut self, fast_mode: bool) {
        self.session.buffer.set_fast_mode(fast_mode);
    }

    /// Runs the pipeline until the puzzle is solved or no enabled
    /// strategy makes progress.
    ///
    /// # Errors
    ///
    /// Fails with [`SolverError::Contradiction`] when applying a found
    /// step places a digit that is no longer a candidate. The log keeps
    /// every step applied up to that point.
    pub fn solve(&mut self) -> Result<SolverState, SolverError> {
        while !self.session.store.is_solved() {
            if !self.step()? {
                self.state = SolverState::Stuck;
                info!("stuck after {} steps", self.log.len());
                return Ok(self.state);
            }
        }
        self.state = SolverState::Solved;
        info!("solved in {} steps", self.log.len());
        Ok(self.state)
    }

    /// Runs strategies from the top of the pipeline until one commits,
    /// and applies what it found.
    ///
    /// Returns `false` when no enabled strategy makes progress.
    ///
    /// # Errors
    ///
    /// Fails with [`SolverError::Contradiction`] when applying a found
    /// step places a digit that is no longer a candidate.
    pub fn step(&mut self) -> Result<bool, SolverError> {
        for index in 0..self.entries.len() {
            if !self.entries[index].enabled() {
                continue;
            }
            self.state = SolverState::Running(index);
            self.session.stop_on_first =
                self.entries[index].commit_policy() == CommitPolicy::FirstOnly;
            debug!("running {}", self.entries[index].name());
            self.entries[index].strategy_mut().apply(&mut self.session);
            if self.harvest(index)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Collects every step the enabled strategies would take on the
    /// current state, without applying any of them.
    pub fn every_possible_next_step(&mut self) -> Vec<PossibleStep> {
        let was_fast = self.session.buffer.fast_mode();
        self.session.buffer.set_fast_mode(false);
        let mut result = Vec::new();
        for index in 0..self.entries.len() {
            if !self.entries[index].enabled() {
                continue;
            }
            self.session.stop_on_first = false;
            self.entries[index].strategy_mut().apply(&mut self.session);
            let name = self.entries[index].name();
            for commit in self.session.buffer.take_commits() {
                result.push(PossibleStep {
                    strategy: name,
                    commit,
                });
            }
            let _ = self.session.buffer.dump_changes();
        }
        self.session.buffer.set_fast_mode(was_fast);
        result
    }

    /// Applies one step picked from
    /// [`every_possible_next_step`](Self::every_possible_next_step).
    ///
    /// Returns `false` when none of its changes still apply.
    ///
    /// # Errors
    ///
    /// Fails with [`SolverError::Contradiction`] when a placed digit is no
    /// longer a candidate of its cell.
    pub fn apply_commit(&mut self, step: PossibleStep) -> Result<bool, SolverError> {
        let state_before = self.session.store.snapshot();
        let applied = self.apply_changes(step.commit.changes())?;
        if applied.is_empty() {
            return Ok(false);
        }
        let report = step.commit.build_report(&state_before);
        self.log.push(SolvingStep {
            strategy: step.strategy,
            changes: applied,
            report: Some(report),
            state_before,
        });
        Ok(true)
    }

    /// Applies and logs whatever the strategy at `index` committed.
    fn harvest(&mut self, index: usize) -> Result<bool, SolverError> {
        let name = self.entries[index].name();

        if self.session.buffer.fast_mode() {
            let changes = self.session.buffer.dump_changes();
            if changes.is_empty() {
                return Ok(false);
            }
            let state_before = self.session.store.snapshot();
            let applied = self.apply_changes(&changes)?;
            if applied.is_empty() {
                return Ok(false);
            }
            debug!("{name}: {} changes", applied.len());
            self.log.push(SolvingStep {
                strategy: name,
                changes: applied,
                report: None,
                state_before,
            });
            return Ok(true);
        }

        let commits = self.session.buffer.take_commits();
        if commits.is_empty() {
            return Ok(false);
        }
        let mut progressed = false;
        for commit in commits {
            let state_before = self.session.store.snapshot();
            let applied = self.apply_changes(commit.changes())?;
            if applied.is_empty() {
                continue;
            }
            debug!("{name}: {} changes", applied.len());
            let report = commit.build_report(&state_before);
            self.log.push(SolvingStep {
                strategy: name,
                changes: applied,
                report: Some(report),
                state_before,
            });
            progressed = true;
        }
        Ok(progressed)
    }

    /// Applies changes to the store, returning the ones that had an
    /// effect.
    fn apply_changes(&mut self, changes: &[SolverChange]) -> Result<Vec<SolverChange>, SolverError> {
        let mut applied = Vec::with_capacity(changes.len());
        for &change in changes {
            let effective = match change {
                SolverChange::Assignment(cp) => {
                    if self.session.store.placed_at(cp.cell) == cp.digit {
                        false
                    } else {
                        self.session.store.assign(cp.cell, cp.digit)?;
                        true
                    }
                }
                SolverChange::Elimination(cp) => self.session.store.eliminate(cp.cell, cp.digit),
            };
            if effective {
                applied.push(change);
            }
        }
        if !applied.is_empty() {
            self.session.precomputer.clear();
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use lacework_core::{Cell, translate};

    use crate::{buffer::PlainReportBuilder, strategy::NakedSingle};

    use super::*;

    #[test]
    fn test_session_commit_respects_stop_policy() {
        let store = CandidateStore::from_grid(&translate::parse_line("12345678."));
        let mut session = SolverSession::new(store);

        session.propose_assignment(CellPossibility::from_coords(0, 8, 9));
        assert!(session.commit(Box::new(PlainReportBuilder::new("place the nine"))));

        session.stop_on_first = false;
        session.propose_elimination(CellPossibility::from_coords(1, 0, 9));
        assert!(!session.commit(Box::new(PlainReportBuilder::new("keep going"))));
    }

    #[test]
    fn test_empty_commit_does_not_stop() {
        let store = CandidateStore::from_grid(&Grid::new());
        let mut session = SolverSession::new(store);
        assert!(!session.commit(Box::new(PlainReportBuilder::new("nothing"))));
    }

    #[test]
    fn test_step_applies_and_logs() {
        let grid = translate::parse_line("12345678.");
        let mut solver = StrategySolver::with_strategies(
            CandidateStore::from_grid(&grid),
            vec![crate::strategy::StrategyEntry::new(Box::new(NakedSingle::new()))],
        );

        assert!(solver.step().unwrap());
        assert_eq!(solver.grid().get(Cell::new(0, 8)), 9);
        assert_eq!(solver.log().len(), 1);
        let step = &solver.log()[0];
        assert_eq!(step.strategy, "Naked Single");
        assert!(step.report.is_some());
        assert_eq!(step.state_before.get(Cell::new(0, 8)).solved(), None);
    }

    #[test]
    fn test_fast_mode_logs_without_reports() {
        let grid = translate::parse_line("12345678.");
        let mut solver = StrategySolver::with_strategies(
            CandidateStore::from_grid(&grid),
            vec![crate::strategy::StrategyEntry::new(Box::new(NakedSingle::new()))],
        );
        solver.set_fast_mode(true);

        assert!(solver.step().unwrap());
        assert_eq!(solver.grid().get(Cell::new(0, 8)), 9);
        assert!(solver.log()[0].report.is_none());
    }

    /// Commits both cells of a box to the same digit.
    #[derive(Debug)]
    struct ClashingPair;

    impl crate::strategy::Strategy for ClashingPair {
        fn name(&self) -> &'static str {
            "Clashing Pair"
        }

        fn difficulty(&self) -> crate::strategy::Difficulty {
            crate::strategy::Difficulty::Basic
        }

        fn apply(&mut self, session: &mut SolverSession) {
            session.propose_assignment(CellPossibility::from_coords(0, 8, 9));
            session.propose_assignment(CellPossibility::from_coords(1, 6, 9));
            session.commit(Box::new(PlainReportBuilder::new("two nines in one box")));
        }
    }

    #[test]
    fn test_conflicting_commit_surfaces_contradiction() {
        let mut solver = StrategySolver::with_strategies(
            CandidateStore::from_grid(&Grid::new()),
            vec![crate::strategy::StrategyEntry::new(Box::new(ClashingPair))],
        );

        let err = solver.step().unwrap_err();
        assert_eq!(
            err,
            SolverError::Contradiction(CellPossibility::from_coords(1, 6, 9))
        );
        assert!(solver.log().is_empty());
    }
}
