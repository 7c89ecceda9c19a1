//! Cells reduced to a single candidate.

use lacework_core::{Cell, CellPossibility};

use crate::{
    buffer::PlainReportBuilder,
    solver::SolverSession,
    strategy::{Difficulty, Strategy},
};

const NAME: &str = "Naked Single";

/// Places the digit of any cell with exactly one candidate left.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle;

impl NakedSingle {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Strategy for NakedSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Basic
    }

    fn apply(&mut self, session: &mut SolverSession) {
        for cell in Cell::all() {
            let candidates = session.store().candidates_at(cell);
            if candidates.len() != 1 {
                continue;
            }
            let Some(digit) = candidates.iter().next() else {
                continue;
            };
            let cp = CellPossibility::new(cell, digit);
            session.propose_assignment(cp);
            if session.commit(Box::new(PlainReportBuilder::new(format!("{NAME}: {cp}")))) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lacework_core::translate;

    use crate::{buffer::SolverChange, store::CandidateStore};

    use super::*;

    #[test]
    fn test_places_the_last_candidate_of_a_row() {
        let store = CandidateStore::from_grid(&translate::parse_line("12345678."));
        let mut session = SolverSession::new(store);
        let mut strategy = NakedSingle::new();
        strategy.apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0].changes(),
            &[SolverChange::Assignment(CellPossibility::from_coords(0, 8, 9))]
        );
    }

    #[test]
    fn test_no_single_no_commit() {
        let store = CandidateStore::from_grid(&translate::parse_line("123456..."));
        let mut session = SolverSession::new(store);
        let mut strategy = NakedSingle::new();
        strategy.apply(&mut session);
        assert!(session.take_commits().is_empty());
    }
}
