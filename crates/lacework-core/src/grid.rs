//! The solved-digit layer of a puzzle grid.

use std::fmt::{self, Display};

use crate::{candidates::CandidateSet, cell::Cell};

/// A 9x9 grid of placed digits, 0 meaning empty.
///
/// # Examples
///
/// ```
/// use lacework_core::{Cell, Grid};
///
/// let mut grid = Grid::new();
/// grid.set(Cell::new(0, 0), 5);
/// assert_eq!(grid.get(Cell::new(0, 0)), 5);
/// assert!(!grid.is_complete());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [u8; 81],
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [0; 81] }
    }

    /// Returns the digit placed in `cell`, or 0 if the cell is empty.
    #[must_use]
    pub const fn get(&self, cell: Cell) -> u8 {
        self.cells[cell.flat_index()]
    }

    /// Places `digit` in `cell`.
    pub const fn set(&mut self, cell: Cell, digit: u8) {
        debug_assert!(digit >= 1 && digit <= 9);
        self.cells[cell.flat_index()] = digit;
    }

    /// Empties `cell`.
    pub const fn clear(&mut self, cell: Cell) {
        self.cells[cell.flat_index()] = 0;
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&digit| digit != 0)
    }

    /// Returns the number of placed digits.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|&&digit| digit != 0).count()
    }

    /// Returns the digits placed in row `row`.
    #[must_use]
    pub fn row_digits(&self, row: u8) -> CandidateSet {
        (0..9)
            .map(|col| self.get(Cell::new(row, col)))
            .filter(|&digit| digit != 0)
            .collect()
    }

    /// Returns the digits placed in column `col`.
    #[must_use]
    pub fn col_digits(&self, col: u8) -> CandidateSet {
        (0..9)
            .map(|row| self.get(Cell::new(row, col)))
            .filter(|&digit| digit != 0)
            .collect()
    }

    /// Returns the digits placed in box `box_index`.
    #[must_use]
    pub fn box_digits(&self, box_index: u8) -> CandidateSet {
        let base_row = (box_index / 3) * 3;
        let base_col = (box_index % 3) * 3;
        (0..9)
            .map(|position| {
                self.get(Cell::new(
                    base_row + position / 3,
                    base_col + position % 3,
                ))
            })
            .filter(|&digit| digit != 0)
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in Cell::all() {
            let digit = self.get(cell);
            if digit == 0 {
                write!(f, ".")?;
            } else {
                write!(f, "{digit}")?;
            }
        }
        Ok(())
    }
}
