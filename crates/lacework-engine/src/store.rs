//! The candidate store: per-cell sets plus derived position indexes.

use lacework_core::{
    BoxPositions, CandidateSet, Cell, CellPossibility, Grid, GridPositions, LinePositions,
    SolvingState,
    state::CellContent,
};

use crate::error::SolverError;

/// Bit-packed candidate tracking for one solving session.
///
/// Alongside the per-cell candidate sets the store maintains, per digit,
/// the grid-wide position set and the row, column and box position sets.
/// Every mutation goes through [`assign`](Self::assign) or
/// [`eliminate`](Self::eliminate), which update the per-cell sets and all
/// derived indexes in the same call, so no reader ever observes a store
/// with stale indexes.
#[derive(Debug, Clone)]
pub struct CandidateStore {
    grid: Grid,
    candidates: [CandidateSet; 81],
    grid_positions: [GridPositions; 9],
    row_positions: [[LinePositions; 9]; 9],
    col_positions: [[LinePositions; 9]; 9],
    box_positions: [[BoxPositions; 9]; 9],
}

impl CandidateStore {
    /// Builds a store from the given grid, deriving every empty cell's
    /// candidates from its peers.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let mut store = Self {
            grid: *grid,
            candidates: [CandidateSet::EMPTY; 81],
            grid_positions: [GridPositions::new(); 9],
            row_positions: [[LinePositions::new(); 9]; 9],
            col_positions: [[LinePositions::new(); 9]; 9],
            box_positions: [[BoxPositions::new(); 9]; 9],
        };
        for cell in Cell::all() {
            if grid.get(cell) != 0 {
                continue;
            }
            let forbidden = grid
                .row_digits(cell.row)
                .union(grid.col_digits(cell.col))
                .union(grid.box_digits(cell.box_index()));
            for digit in CandidateSet::CLASSIC.difference(forbidden).iter() {
                store.add_candidate(cell, digit);
            }
        }
        store
    }

    /// Builds a store from an explicit per-cell state, keeping each
    /// unsolved cell's recorded candidates even when they are narrower
    /// than what its peers allow.
    #[must_use]
    pub fn from_state(state: &SolvingState) -> Self {
        let mut store = Self::from_grid(&state.grid());
        for cell in Cell::all() {
            if let CellContent::Candidates(kept) = state.get(cell) {
                for digit in store.candidates_at(cell).difference(kept).iter() {
                    store.remove_candidate(cell, digit);
                }
            }
        }
        store
    }

    /// Returns the candidates of `cell`. Empty for a solved cell.
    #[must_use]
    pub const fn candidates_at(&self, cell: Cell) -> CandidateSet {
        self.candidates[cell.flat_index()]
    }

    /// Returns the digit placed in `cell`, or 0.
    #[must_use]
    pub const fn placed_at(&self, cell: Cell) -> u8 {
        self.grid.get(cell)
    }

    /// Returns the placed-digit layer.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns every cell where `digit` is still a candidate.
    #[must_use]
    pub const fn positions_of(&self, digit: u8) -> GridPositions {
        self.grid_positions[digit as usize - 1]
    }

    /// Returns the columns of `row` where `digit` is still a candidate.
    #[must_use]
    pub const fn row_positions(&self, row: u8, digit: u8) -> LinePositions {
        self.row_positions[digit as usize - 1][row as usize]
    }

    /// Returns the rows of `col` where `digit` is still a candidate.
    #[must_use]
    pub const fn col_positions(&self, col: u8, digit: u8) -> LinePositions {
        self.col_positions[digit as usize - 1][col as usize]
    }

    /// Returns the positions of box `box_index` where `digit` is still a
    /// candidate.
    #[must_use]
    pub const fn box_positions(&self, box_index: u8, digit: u8) -> BoxPositions {
        self.box_positions[digit as usize - 1][box_index as usize]
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.grid.is_complete()
    }

    /// Places `digit` in `cell` and strips it from all peers.
    ///
    /// # Errors
    ///
    /// Fails with [`SolverError::Contradiction`] if `digit` is not
    /// currently a candidate of `cell`, which means an upstream deduction
    /// was unsound.
    pub fn assign(&mut self, cell: Cell, digit: u8) -> Result<(), SolverError> {
        if !self.candidates_at(cell).contains(digit) {
            return Err(SolverError::Contradiction(CellPossibility::new(cell, digit)));
        }
        for other in self.candidates_at(cell).iter() {
            self.remove_candidate(cell, other);
        }
        self.grid.set(cell, digit);
        for peer in cell.peers().iter() {
            if self.candidates_at(peer).contains(digit) {
                self.remove_candidate(peer, digit);
            }
        }
        Ok(())
    }

    /// Removes `digit` from the candidates of `cell`.
    ///
    /// Returns `false` when the digit was already absent; the store is
    /// left bit-for-bit unchanged in that case.
    pub fn eliminate(&mut self, cell: Cell, digit: u8) -> bool {
        if !self.candidates_at(cell).contains(digit) {
            return false;
        }
        self.remove_candidate(cell, digit);
        true
    }

    /// Takes a full per-cell snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SolvingState {
        let mut state = SolvingState::blank();
        for cell in Cell::all() {
            let placed = self.grid.get(cell);
            let content = if placed == 0 {
                CellContent::Candidates(self.candidates_at(cell))
            } else {
                CellContent::Solved(placed)
            };
            state.set(cell, content);
        }
        state
    }

    fn add_candidate(&mut self, cell: Cell, digit: u8) {
        let d = digit as usize - 1;
        self.candidates[cell.flat_index()].insert(digit);
        self.grid_positions[d].insert(cell);
        self.row_positions[d][cell.row as usize].insert(cell.col);
        self.col_positions[d][cell.col as usize].insert(cell.row);
        self.box_positions[d][cell.box_index() as usize].insert(cell.box_position());
    }

    fn remove_candidate(&mut self, cell: Cell, digit: u8) {
        let d = digit as usize - 1;
        self.candidates[cell.flat_index()].remove(digit);
        self.grid_positions[d].remove(cell);
        self.row_positions[d][cell.row as usize].remove(cell.col);
        self.col_positions[d][cell.col as usize].remove(cell.row);
        self.box_positions[d][cell.box_index() as usize].remove(cell.box_position());
    }
}
