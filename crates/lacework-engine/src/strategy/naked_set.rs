//! Naked pairs, triples and quads.

use lacework_core::{CandidateSet, Cell, CellPossibility};

use crate::{
    buffer::PlainReportBuilder,
    solver::SolverSession,
    strategy::{Difficulty, Strategy},
};

/// `n` cells of one unit restricted to the same `n` digits together.
///
/// Those digits are spoken for, so they come off every other cell of the
/// unit.
#[derive(Debug, Clone, Copy)]
pub struct NakedSet {
    size: usize,
}

impl NakedSet {
    /// Two cells sharing two digits.
    #[must_use]
    pub const fn pair() -> Self {
        Self { size: 2 }
    }

    /// Three cells sharing three digits.
    #[must_use]
    pub const fn triple() -> Self {
        Self { size: 3 }
    }

    /// Four cells sharing four digits.
    #[must_use]
    pub const fn quad() -> Self {
        Self { size: 4 }
    }
}

impl Strategy for NakedSet {
    fn name(&self) -> &'static str {
        match self.size {
            2 => "Naked Pair",
            3 => "Naked Triple",
            _ => "Naked Quad",
        }
    }

    fn difficulty(&self) -> Difficulty {
        if self.size <= 3 {
            Difficulty::Easy
        } else {
            Difficulty::Medium
        }
    }

    fn apply(&mut self, session: &mut SolverSession) {
        for (label, cells) in units() {
            let restricted: Vec<(Cell, CandidateSet)> = cells
                .iter()
                .map(|&cell| (cell, session.store().candidates_at(cell)))
                .filter(|(_, set)| set.len() >= 2 && set.len() <= self.size)
                .collect();
            if restricted.len() < self.size {
                continue;
            }

            let mut findings = Vec::new();
            collect(&restricted, 0, &mut Vec::new(), CandidateSet::EMPTY, self.size, &mut findings);

            for (set_cells, digits) in findings {
                for &cell in &cells {
                    if set_cells.contains(&cell) {
                        continue;
                    }
                    let shared = digits.intersection(session.store().candidates_at(cell));
                    for digit in shared.iter() {
                        session.propose_elimination(CellPossibility::new(cell, digit));
                    }
                }
                let description = format!("{}: {} in {}", self.name(), digits, label);
                if session.commit(Box::new(PlainReportBuilder::new(description))) {
                    return;
                }
            }
        }
    }
}

/// Every row, column and box with a display label, in that order.
fn units() -> Vec<(String, Vec<Cell>)> {
    let mut result = Vec::with_capacity(27);
    for row in 0..9 {
        let cells = (0..9).map(|col| Cell::new(row, col)).collect();
        result.push((format!("row {}", row + 1), cells));
    }
    for col in 0..9 {
        let cells = (0..9).map(|row| Cell::new(row, col)).collect();
        result.push((format!("column {}", col + 1), cells));
    }
    for box_index in 0..9 {
        let (base_row, base_col) = (box_index / 3 * 3, box_index % 3 * 3);
        let cells = (0..9)
            .map(|i| Cell::new(base_row + i / 3, base_col + i % 3))
            .collect();
        result.push((format!("box {}", box_index + 1), cells));
    }
    result
}

/// Enumerates `size`-subsets whose candidate union has exactly `size`
/// digits, pruning any branch that already exceeds the bound.
fn collect(
    restricted: &[(Cell, CandidateSet)],
    start: usize,
    chosen: &mut Vec<Cell>,
    union: CandidateSet,
    size: usize,
    findings: &mut Vec<(Vec<Cell>, CandidateSet)>,
) {
    if chosen.len() == size {
        if union.len() == size {
            findings.push((chosen.clone(), union));
        }
        return;
    }
    for i in start..restricted.len() {
        let (cell, set) = restricted[i];
        let merged = union.union(set);
        if merged.len() > size {
            continue;
        }
        chosen.push(cell);
        collect(restricted, i + 1, chosen, merged, size, findings);
        chosen.pop();
    }
}

#[cfg(test)]
mod tests {
    use lacework_core::translate;

    use crate::store::CandidateStore;

    use super::*;

    /// Restricts `cell` to exactly `kept`.
    fn restrict(store: &mut CandidateStore, cell: Cell, kept: CandidateSet) {
        for digit in store.candidates_at(cell).difference(kept).iter() {
            store.eliminate(cell, digit);
        }
    }

    #[test]
    fn test_pair_strips_the_rest_of_the_row() {
        let mut store = CandidateStore::from_grid(&translate::parse_line(""));
        let pair = CandidateSet::from_iter([4, 7]);
        restrict(&mut store, Cell::new(0, 0), pair);
        restrict(&mut store, Cell::new(0, 1), pair);

        let mut session = SolverSession::new(store);
        NakedSet::pair().apply(&mut session);

        let commits = session.take_commits();
        assert_eq!(commits.len(), 1);
        let changes = commits[0].changes();
        // 4 and 7 come off the seven other cells of row 1
        assert_eq!(changes.len(), 14);
        for change in changes {
            let cp = change.possibility();
            assert!(change.is_elimination());
            assert_eq!(cp.cell.row, 0);
            assert!(cp.cell.col >= 2);
            assert!(pair.contains(cp.digit));
        }
    }

    #[test]
    fn test_no_set_on_a_blank_grid() {
        let store = CandidateStore::from_grid(&translate::parse_line(""));
        let mut session = SolverSession::new(store);
        NakedSet::triple().apply(&mut session);
        assert!(session.take_commits().is_empty());
    }
}
