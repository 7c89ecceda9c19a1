//! Derived position bitsets over rows, columns, boxes and the whole grid.

use std::ops::{BitAnd, BitOr};

use crate::cell::Cell;

/// Positions 0 through 8 of one row or column holding a given digit.
///
/// # Examples
///
/// ```
/// use lacework_core::LinePositions;
///
/// let positions = LinePositions::from_iter([2, 5]);
/// assert_eq!(positions.len(), 2);
/// assert!(positions.contains(5));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinePositions(u16);

impl LinePositions {
    /// Creates an empty position set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns the number of positions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `position` is in the set.
    #[must_use]
    pub const fn contains(self, position: u8) -> bool {
        debug_assert!(position < 9);
        self.0 & (1 << position) != 0
    }

    /// Adds `position` to the set.
    pub const fn insert(&mut self, position: u8) {
        debug_assert!(position < 9);
        self.0 |= 1 << position;
    }

    /// Removes `position` from the set.
    pub const fn remove(&mut self, position: u8) {
        debug_assert!(position < 9);
        self.0 &= !(1 << position);
    }

    /// Returns the smallest position in the set, if any.
    #[must_use]
    pub fn first(self) -> Option<u8> {
        (!self.is_empty()).then(|| self.0.trailing_zeros() as u8)
    }

    /// Iterates over the positions in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        BitIter(self.0)
    }
}

impl FromIterator<u8> for LinePositions {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut positions = Self::new();
        for position in iter {
            positions.insert(position);
        }
        positions
    }
}

/// Positions within one 3x3 box, numbered row-major 0 through 8.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxPositions(u16);

impl BoxPositions {
    /// Creates an empty position set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns the number of positions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the row-major `position` is in the set.
    #[must_use]
    pub const fn contains(self, position: u8) -> bool {
        debug_assert!(position < 9);
        self.0 & (1 << position) != 0
    }

    /// Adds the row-major `position` to the set.
    pub const fn insert(&mut self, position: u8) {
        debug_assert!(position < 9);
        self.0 |= 1 << position;
    }

    /// Removes the row-major `position` from the set.
    pub const fn remove(&mut self, position: u8) {
        debug_assert!(position < 9);
        self.0 &= !(1 << position);
    }

    /// Iterates over the positions in ascending row-major order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        BitIter(self.0)
    }

    /// Iterates over the cells of box `box_index` present in the set.
    pub fn cells(self, box_index: u8) -> impl Iterator<Item = Cell> {
        debug_assert!(box_index < 9);
        self.iter().map(move |position| {
            Cell::new(
                (box_index / 3) * 3 + position / 3,
                (box_index % 3) * 3 + position % 3,
            )
        })
    }
}

struct BitIter(u16);

impl Iterator for BitIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let position = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(position)
    }
}

/// A set of cells over the whole 81-cell grid.
///
/// Backed by two 64-bit words indexed by `row * 9 + col`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPositions {
    words: [u64; 2],
}

impl GridPositions {
    /// Creates an empty cell set.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: [0; 2] }
    }

    /// Returns the number of cells in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        (self.words[0].count_ones() + self.words[1].count_ones()) as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.words[0] == 0 && self.words[1] == 0
    }

    /// Returns `true` if `cell` is in the set.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        let index = cell.flat_index();
        self.words[index / 64] & (1 << (index % 64)) != 0
    }

    /// Adds `cell` to the set.
    pub const fn insert(&mut self, cell: Cell) {
        let index = cell.flat_index();
        self.words[index / 64] |= 1 << (index % 64);
    }

    /// Removes `cell` from the set.
    pub const fn remove(&mut self, cell: Cell) {
        let index = cell.flat_index();
        self.words[index / 64] &= !(1 << (index % 64));
    }

    /// Returns the cells present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            words: [
                self.words[0] & other.words[0],
                self.words[1] & other.words[1],
            ],
        }
    }

    /// Returns the cells present in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            words: [
                self.words[0] | other.words[0],
                self.words[1] | other.words[1],
            ],
        }
    }

    /// Returns the first cell in row-major order, if any.
    #[must_use]
    pub fn first(self) -> Option<Cell> {
        self.iter().next()
    }

    /// Iterates over the cells in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Cell> {
        GridIter {
            words: self.words,
            word_index: 0,
        }
    }
}

impl FromIterator<Cell> for GridPositions {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut positions = Self::new();
        for cell in iter {
            positions.insert(cell);
        }
        positions
    }
}

impl BitAnd for GridPositions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitOr for GridPositions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

struct GridIter {
    words: [u64; 2],
    word_index: usize,
}

impl Iterator for GridIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.word_index < 2 {
            let word = self.words[self.word_index];
            if word == 0 {
                self.word_index += 1;
                continue;
            }
            let bit = word.trailing_zeros() as usize;
            self.words[self.word_index] &= word - 1;
            let index = self.word_index * 64 + bit;
            return Some(Cell::new((index / 9) as u8, (index % 9) as u8));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_positions() {
        let mut positions = LinePositions::new();
        positions.insert(0);
        positions.insert(8);
        assert_eq!(positions.len(), 2);
        assert!(positions.contains(0));
        assert!(positions.contains(8));
        assert_eq!(positions.first(), Some(0));

        positions.remove(0);
        assert_eq!(positions.iter().collect::<Vec<_>>(), vec![8]);
    }

    #[test]
    fn test_box_positions_cells() {
        let mut positions = BoxPositions::new();
        positions.insert(0);
        positions.insert(4);
        positions.insert(8);

        let cells: Vec<_> = positions.cells(4).collect();
        assert_eq!(
            cells,
            vec![Cell::new(3, 3), Cell::new(4, 4), Cell::new(5, 5)]
        );
    }

    #[test]
    fn test_grid_positions() {
        let mut positions = GridPositions::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(7, 3);
        let c = Cell::new(8, 8);
        positions.insert(a);
        positions.insert(b);
        positions.insert(c);

        assert_eq!(positions.len(), 3);
        assert!(positions.contains(b));
        assert_eq!(positions.iter().collect::<Vec<_>>(), vec![a, b, c]);

        positions.remove(b);
        assert!(!positions.contains(b));
        assert_eq!(positions.len(), 2);
    }

    #[test]
    fn test_grid_positions_ops() {
        let a = GridPositions::from_iter([Cell::new(0, 0), Cell::new(4, 4)]);
        let b = GridPositions::from_iter([Cell::new(4, 4), Cell::new(8, 8)]);

        assert_eq!(
            (a & b).iter().collect::<Vec<_>>(),
            vec![Cell::new(4, 4)]
        );
        assert_eq!((a | b).len(), 3);
    }
}
