//! A per-cell view combining placed digits and surviving candidates.

use crate::{candidates::CandidateSet, cell::Cell, grid::Grid};

/// The content of one cell: a placed digit or its surviving candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContent {
    /// The cell holds a placed digit.
    Solved(u8),
    /// The cell is empty with the given candidate digits.
    Candidates(CandidateSet),
}

impl CellContent {
    /// Returns the placed digit, or `None` for an empty cell.
    #[must_use]
    pub const fn solved(self) -> Option<u8> {
        match self {
            Self::Solved(digit) => Some(digit),
            Self::Candidates(_) => None,
        }
    }

    /// Returns the candidate set, empty for a solved cell.
    #[must_use]
    pub const fn candidates(self) -> CandidateSet {
        match self {
            Self::Solved(_) => CandidateSet::EMPTY,
            Self::Candidates(set) => set,
        }
    }
}

/// A full per-cell snapshot of a grid mid-solve.
///
/// Solved cells carry their digit, empty cells their candidate set. This is
/// the value the dense text formats read and write, and the snapshot type
/// step reports are built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolvingState {
    cells: [CellContent; 81],
}

impl SolvingState {
    /// Creates a blank state: every cell empty with all nine candidates.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            cells: [CellContent::Candidates(CandidateSet::CLASSIC); 81],
        }
    }

    /// Builds a state from placed digits, deriving each empty cell's
    /// candidates from its peers.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let mut state = Self::blank();
        for cell in Cell::all() {
            let digit = grid.get(cell);
            if digit == 0 {
                let mut set = CandidateSet::CLASSIC;
                for peer in cell.peers().iter() {
                    let placed = grid.get(peer);
                    if placed != 0 {
                        set.remove(placed);
                    }
                }
                state.cells[cell.flat_index()] = CellContent::Candidates(set);
            } else {
                state.cells[cell.flat_index()] = CellContent::Solved(digit);
            }
        }
        state
    }

    /// Returns the content of `cell`.
    #[must_use]
    pub const fn get(&self, cell: Cell) -> CellContent {
        self.cells[cell.flat_index()]
    }

    /// Sets the content of `cell`.
    pub const fn set(&mut self, cell: Cell, content: CellContent) {
        self.cells[cell.flat_index()] = content;
    }

    /// Extracts the placed-digit layer.
    #[must_use]
    pub fn grid(&self) -> Grid {
        let mut grid = Grid::new();
        for cell in Cell::all() {
            if let Some(digit) = self.get(cell).solved() {
                grid.set(cell, digit);
            }
        }
        grid
    }
}

impl Default for SolvingState {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_state() {
        let state = SolvingState::blank();
        for cell in Cell::all() {
            assert_eq!(state.get(cell).candidates(), CandidateSet::CLASSIC);
            assert_eq!(state.get(cell).solved(), None);
        }
    }

    #[test]
    fn test_from_grid_derives_candidates() {
        let mut grid = Grid::new();
        grid.set(Cell::new(0, 0), 5);
        let state = SolvingState::from_grid(&grid);

        assert_eq!(state.get(Cell::new(0, 0)).solved(), Some(5));
        // Peers lose 5, unrelated cells keep it
        assert!(!state.get(Cell::new(0, 8)).candidates().contains(5));
        assert!(!state.get(Cell::new(2, 2)).candidates().contains(5));
        assert!(state.get(Cell::new(8, 8)).candidates().contains(5));
    }

    #[test]
    fn test_grid_round_trip() {
        let mut grid = Grid::new();
        grid.set(Cell::new(3, 4), 9);
        grid.set(Cell::new(8, 0), 2);
        assert_eq!(SolvingState::from_grid(&grid).grid(), grid);
    }
}
