//! Box/line intersections.

use lacework_core::{Cell, CellPossibility};

use crate::{
    buffer::PlainReportBuilder,
    solver::SolverSession,
    strategy::{Difficulty, Strategy},
};

const NAME: &str = "Pointing Set";

/// A digit confined to the intersection of a box and a line.
///
/// Confined to one line of its box, the digit leaves the rest of that
/// line. Confined to one box of its line, it leaves the rest of that box.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointingSet;

impl PointingSet {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Strategy for PointingSet {
    fn name(&self) -> &'static str {
        NAME
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn apply(&mut self, session: &mut SolverSession) {
        for digit in 1..=9 {
            for box_index in 0..9 {
                if pointing(session, digit, box_index) {
                    return;
                }
            }
            for line in 0..9 {
                if claiming_in_row(session, digit, line) || claiming_in_col(session, digit, line) {
                    return;
                }
            }
        }
    }
}

/// A digit confined to one line of a box comes off the rest of the line.
fn pointing(session: &mut SolverSession, digit: u8, box_index: u8) -> bool {
    let cells: Vec<Cell> = session
        .store()
        .box_positions(box_index, digit)
        .cells(box_index)
        .collect();
    if cells.len() < 2 {
        return false;
    }

    let row = cells[0].row;
    if cells.iter().all(|cell| cell.row == row) {
        for col in 0..9 {
            let cell = Cell::new(row, col);
            if cell.box_index() != box_index {
                session.propose_elimination(CellPossibility::new(cell, digit));
            }
        }
        return session.commit(Box::new(PlainReportBuilder::new(format!(
            "{NAME}: {digit} of box {} confined to row {}",
            box_index + 1,
            row + 1
        ))));
    }

    let col = cells[0].col;
    if cells.iter().all(|cell| cell.col == col) {
        for row in 0..9 {
            let cell = Cell::new(row, col);
            if cell.box_index() != box_index {
                session.propose_elimination(CellPossibility::new(cell, digit));
            }
        }
        return session.commit(Box::new(PlainReportBuilder::new(format!(
            "{NAME}: {digit} of box {} confined to column {}",
            box_index + 1,
            col + 1
        ))));
    }
    false
}

/// A digit confined to one box of a row comes off the rest of the box.
fn claiming_in_row(session: &mut SolverSession, digit: u8, row: u8) -> bool {
    let cols: Vec<u8> = session.store().row_positions(row, digit).iter().collect();
    if cols.len() < 2 || !cols.iter().all(|col| col / 3 == cols[0] / 3) {
        return false;
    }
    let box_index = row / 3 * 3 + cols[0] / 3;
    claim(session, digit, box_index, |cell| cell.row != row, format!(
        "{NAME}: {digit} of row {} confined to box {}",
        row + 1,
        box_index + 1
    ))
}

/// A digit confined to one box of a column comes off the rest of the box.
fn claiming_in_col(session: &mut SolverSession, digit: u8, col: u8) -> bool {
    let rows: Vec<u8> = session.store().col_positions(col, digit).iter().collect();
    if rows.len() < 2 || !rows.iter().all(|row| row / 3 == rows[0] / 3) {
        return false;
    }
    let box_index = rows[0] / 3 * 3 + col / 3;
    claim(session, digit, box_index, |cell| cell.col != col, format!(
        "{NAME}: {digit} of column {} confined to box {}",
        col + 1,
        box_index + 1
    ))
}

fn claim(
    session: &mut SolverSession,
    digit: u8,
    box_index: u8,
    outside: impl Fn(Cell) -> bool,
    description: String,
) -> bool {
    let targets: Vec<Cell> = session
        .store()
        .box_positions(box_index, digit)
        .cells(box_index)
        .filter(|&cell| outside(cell))
        .collect();
    for cell in targets {
        session.propose_elimination(CellPossibility::new(cell, digit));
    }
    session.commit(Box::new(PlainReportBuilder::new(description)))
}

#[cfg(test)]
mod tests {
    use lacework_core::translate;

    use crate::store::CandidateStore;

    use super::*;

    #[test]
    fn test_pointing_strips_the_rest_of_the_row() {
        // Confine 5 within box 1 to row 1
        let mut store = CandidateStore::from_grid(&translate::parse_line(""));
        for row in [1, 2] {
            for col in 0..3 {
                store.eliminate(Cell::new(row, col), 5);
            }
        }

        let mut session = SolverSession::new(store);
        PointingSet::new().apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        let changes = commits[0].changes();
        assert_eq!(changes.len(), 6);
        for change in changes {
            let cp = change.possibility();
            assert_eq!(cp.digit, 5);
            assert_eq!(cp.cell.row, 0);
            assert!(cp.cell.col >= 3);
        }
    }

    #[test]
    fn test_claiming_strips_the_rest_of_the_box() {
        // Confine 5 within row 1 to box 1
        let mut store = CandidateStore::from_grid(&translate::parse_line(""));
        for col in 3..9 {
            store.eliminate(Cell::new(0, col), 5);
        }

        let mut session = SolverSession::new(store);
        PointingSet::new().apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        let changes = commits[0].changes();
        assert_eq!(changes.len(), 6);
        for change in changes {
            let cp = change.possibility();
            assert_eq!(cp.digit, 5);
            assert!(cp.cell.row >= 1);
            assert!(cp.cell.col <= 2);
        }
    }

    #[test]
    fn test_blank_grid_has_no_intersection() {
        let store = CandidateStore::from_grid(&translate::parse_line(""));
        let mut session = SolverSession::new(store);
        PointingSet::new().apply(&mut session);
        assert!(session.take_commits().is_empty());
    }
}
