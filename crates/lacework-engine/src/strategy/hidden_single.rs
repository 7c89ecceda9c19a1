//! Digits confined to a single position in a unit.

use lacework_core::CellPossibility;

use crate::{
    buffer::PlainReportBuilder,
    solver::SolverSession,
    strategy::{Difficulty, Strategy},
};

const NAME: &str = "Hidden Single";

/// Places any digit that has exactly one remaining position in a row,
/// column or box.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle;

impl HiddenSingle {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Strategy for HiddenSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Basic
    }

    fn apply(&mut self, session: &mut SolverSession) {
        for digit in 1..=9 {
            for index in 0..9 {
                let row = session.store().row_positions(index, digit);
                if row.len() == 1 {
                    if let Some(col) = row.iter().next() {
                        let cp = CellPossibility::from_coords(index, col, digit);
                        if place(session, cp, format_args!("row {}", index + 1)) {
                            return;
                        }
                    }
                }
                let col = session.store().col_positions(index, digit);
                if col.len() == 1 {
                    if let Some(row) = col.iter().next() {
                        let cp = CellPossibility::from_coords(row, index, digit);
                        if place(session, cp, format_args!("column {}", index + 1)) {
                            return;
                        }
                    }
                }
                let boxed = session.store().box_positions(index, digit);
                if boxed.len() == 1 {
                    if let Some(cell) = boxed.cells(index).next() {
                        let cp = CellPossibility::new(cell, digit);
                        if place(session, cp, format_args!("box {}", index + 1)) {
                            return;
                        }
                    }
                }
            }
        }
    }
}

fn place(session: &mut SolverSession, cp: CellPossibility, unit: std::fmt::Arguments<'_>) -> bool {
    session.propose_assignment(cp);
    session.commit(Box::new(PlainReportBuilder::new(format!(
        "{NAME}: {cp} in {unit}"
    ))))
}

#[cfg(test)]
mod tests {
    use lacework_core::{Cell, translate};

    use crate::{buffer::SolverChange, store::CandidateStore};

    use super::*;

    #[test]
    fn test_digit_with_one_row_position() {
        // Strip 4 from all of row 3 except r3c3
        let mut store = CandidateStore::from_grid(&translate::parse_line(""));
        for col in 0..9 {
            if col != 2 {
                store.eliminate(Cell::new(2, col), 4);
            }
        }
        assert_eq!(store.row_positions(2, 4).len(), 1);

        let mut session = SolverSession::new(store);
        let mut strategy = HiddenSingle::new();
        strategy.apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0].changes(),
            &[SolverChange::Assignment(CellPossibility::from_coords(2, 2, 4))]
        );
    }

    #[test]
    fn test_blank_grid_has_no_hidden_single() {
        let store = CandidateStore::from_grid(&translate::parse_line(""));
        let mut session = SolverSession::new(store);
        let mut strategy = HiddenSingle::new();
        strategy.apply(&mut session);
        assert!(session.take_commits().is_empty());
    }
}
