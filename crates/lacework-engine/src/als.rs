//! Enumeration of almost-locked sets.

use lacework_core::{CandidateSet, Cell};
use tinyvec::ArrayVec;

use crate::{graph::AlmostLockedSet, store::CandidateStore};

/// The largest cell count searched for.
pub const MAX_CELLS: usize = 4;

/// Finds every almost-locked set of up to [`MAX_CELLS`] cells inside a
/// row, column or box.
///
/// Sets found while scanning columns and boxes that an earlier unit
/// already reported are skipped: single cells only count once, and a set
/// confined to one line is only reported by that line's scan.
#[must_use]
pub fn full_grid(store: &CandidateStore) -> Vec<AlmostLockedSet> {
    let mut result = Vec::new();
    let mut visited = Visit::default();

    for row in 0..9 {
        let unit: Vec<Cell> = (0..9).map(|col| Cell::new(row, col)).collect();
        search(store, &unit, 0, &mut visited, Dedup::None, &mut result);
    }
    for col in 0..9 {
        let unit: Vec<Cell> = (0..9).map(|row| Cell::new(row, col)).collect();
        search(store, &unit, 0, &mut visited, Dedup::Singles, &mut result);
    }
    for box_index in 0..9 {
        let unit: Vec<Cell> = (0..9)
            .map(|position| {
                Cell::new(
                    (box_index / 3) * 3 + position / 3,
                    (box_index % 3) * 3 + position % 3,
                )
            })
            .collect();
        search(store, &unit, 0, &mut visited, Dedup::Lines, &mut result);
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dedup {
    None,
    Singles,
    Lines,
}

#[derive(Debug, Default)]
struct Visit {
    cells: Vec<Cell>,
    digit_sets: Vec<CandidateSet>,
}

fn search(
    store: &CandidateStore,
    unit: &[Cell],
    start: usize,
    visited: &mut Visit,
    dedup: Dedup,
    result: &mut Vec<AlmostLockedSet>,
) {
    for (i, &cell) in unit.iter().enumerate().skip(start) {
        let inspected = store.candidates_at(cell);
        let current = visited
            .digit_sets
            .iter()
            .fold(CandidateSet::EMPTY, |acc, &set| acc.union(set));
        if inspected.is_empty()
            || (!current.is_empty() && current.intersection(inspected).is_empty())
        {
            continue;
        }

        visited.cells.push(cell);
        visited.digit_sets.push(inspected);
        let merged = current.union(inspected);

        if merged.len() == visited.cells.len() + 1 && !is_duplicate(&visited.cells, dedup) {
            result.push(AlmostLockedSet::new(
                ArrayVec::from_iter(visited.cells.iter().copied()),
                ArrayVec::from_iter(visited.digit_sets.iter().copied()),
            ));
        }

        if visited.cells.len() < MAX_CELLS {
            search(store, unit, i + 1, visited, dedup, result);
        }

        visited.cells.pop();
        visited.digit_sets.pop();
    }
}

fn is_duplicate(cells: &[Cell], dedup: Dedup) -> bool {
    match dedup {
        Dedup::None => false,
        Dedup::Singles => cells.len() <= 1,
        Dedup::Lines => {
            if cells.len() <= 1 {
                return true;
            }
            let same_row = cells.iter().all(|cell| cell.row == cells[0].row);
            let same_col = cells.iter().all(|cell| cell.col == cells[0].col);
            same_row || same_col
        }
    }
}
