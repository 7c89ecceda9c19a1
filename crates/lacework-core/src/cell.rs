//! Cell coordinates and cell/digit pairs.

use std::fmt::{self, Display};

use crate::positions::GridPositions;

/// A cell coordinate on a 9x9 grid, zero-based.
///
/// # Examples
///
/// ```
/// use lacework_core::Cell;
///
/// let cell = Cell::new(3, 7);
/// assert_eq!(cell.box_index(), 5);
/// assert!(cell.sees(Cell::new(3, 0)));
/// assert!(!cell.sees(Cell::new(4, 0)));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row index, 0 through 8.
    pub row: u8,
    /// Column index, 0 through 8.
    pub col: u8,
}

impl Cell {
    /// Creates a cell coordinate.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Returns the index of the 3x3 box containing this cell, 0 through 8
    /// in row-major order.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Returns the row-major position of this cell within its box.
    #[must_use]
    pub const fn box_position(self) -> u8 {
        (self.row % 3) * 3 + self.col % 3
    }

    /// Returns the row-major index of this cell over the whole grid.
    #[must_use]
    pub const fn flat_index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    /// Returns `true` if the two cells share a row, column or box.
    ///
    /// A cell never sees itself.
    #[must_use]
    pub fn sees(self, other: Self) -> bool {
        if self == other {
            return false;
        }
        self.row == other.row || self.col == other.col || self.box_index() == other.box_index()
    }

    /// Returns every cell seen by this one.
    #[must_use]
    pub fn peers(self) -> GridPositions {
        Self::all().filter(|&other| self.sees(other)).collect()
    }

    /// Iterates over all 81 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..9).flat_map(|row| (0..9).map(move |col| Self::new(row, col)))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// A (cell, digit) pair naming one candidate of one cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellPossibility {
    /// The cell holding the candidate.
    pub cell: Cell,
    /// The candidate digit, 1-based.
    pub digit: u8,
}

impl CellPossibility {
    /// Creates a cell/digit pair.
    #[must_use]
    pub const fn new(cell: Cell, digit: u8) -> Self {
        debug_assert!(digit >= 1 && digit <= 15);
        Self { cell, digit }
    }

    /// Creates a cell/digit pair from raw coordinates.
    #[must_use]
    pub const fn from_coords(row: u8, col: u8, digit: u8) -> Self {
        Self::new(Cell::new(row, col), digit)
    }
}

impl Display for CellPossibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.digit, self.cell)
    }
}

/// Returns the cells seen by every cell of `cells`.
///
/// Cells of the input list never appear in the result.
#[must_use]
pub fn shared_seen_cells(cells: &[Cell]) -> GridPositions {
    let Some((&head, rest)) = cells.split_first() else {
        return GridPositions::new();
    };
    let mut shared = head.peers();
    for &cell in rest {
        shared = shared & cell.peers();
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_index() {
        assert_eq!(Cell::new(0, 0).box_index(), 0);
        assert_eq!(Cell::new(4, 4).box_index(), 4);
        assert_eq!(Cell::new(8, 2).box_index(), 6);
        assert_eq!(Cell::new(3, 7).box_position(), 1);
    }

    #[test]
    fn test_sees() {
        let cell = Cell::new(4, 4);
        assert!(cell.sees(Cell::new(4, 0)));
        assert!(cell.sees(Cell::new(0, 4)));
        assert!(cell.sees(Cell::new(3, 3)));
        assert!(!cell.sees(Cell::new(0, 0)));
        assert!(!cell.sees(cell));
    }

    #[test]
    fn test_peers_count() {
        // 8 in the row, 8 in the column, 4 more in the box
        assert_eq!(Cell::new(0, 0).peers().len(), 20);
        assert_eq!(Cell::new(4, 4).peers().len(), 20);
    }

    #[test]
    fn test_shared_seen_cells() {
        let shared = shared_seen_cells(&[Cell::new(0, 0), Cell::new(0, 8)]);
        // The rest of row 0 only
        assert_eq!(shared.len(), 7);
        for cell in shared.iter() {
            assert_eq!(cell.row, 0);
        }

        let same_box = shared_seen_cells(&[Cell::new(0, 0), Cell::new(1, 1)]);
        assert!(same_box.contains(Cell::new(2, 2)));
        assert!(!same_box.contains(Cell::new(0, 0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(0, 0).to_string(), "r1c1");
        assert_eq!(
            CellPossibility::from_coords(2, 6, 5).to_string(),
            "5r3c7"
        );
    }
}
