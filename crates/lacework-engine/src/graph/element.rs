//! Logical elements the link graph connects.

use std::fmt::{self, Display};

use lacework_core::{CandidateSet, Cell, CellPossibility};
use tinyvec::ArrayVec;

/// One digit confined to a few cells of a box/line intersection.
///
/// A pointing group behaves as a single logical element: the digit is in
/// one of these cells, so anything excluded by all of them is excluded by
/// the group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PossibilityGroup {
    /// The shared digit.
    pub digit: u8,
    /// The covered cells, sorted, 2 or 3 of them.
    pub cells: ArrayVec<[Cell; 3]>,
}

impl PossibilityGroup {
    /// Creates a group from unsorted cells.
    #[must_use]
    pub fn new(digit: u8, mut cells: ArrayVec<[Cell; 3]>) -> Self {
        cells.sort_unstable();
        Self { digit, cells }
    }
}

/// `n` cells restricted to `n + 1` shared candidate digits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlmostLockedSet {
    /// The covered cells, sorted, 2 through 4 of them.
    pub cells: ArrayVec<[Cell; 4]>,
    /// Each cell's own candidates, parallel to `cells`.
    pub cell_digits: ArrayVec<[CandidateSet; 4]>,
    /// The union of the cells' candidates.
    pub digits: CandidateSet,
}

impl AlmostLockedSet {
    /// Creates a set from parallel cell and candidate lists.
    #[must_use]
    pub fn new(cells: ArrayVec<[Cell; 4]>, cell_digits: ArrayVec<[CandidateSet; 4]>) -> Self {
        debug_assert!(cells.len() == cell_digits.len());
        let digits = cell_digits
            .iter()
            .fold(CandidateSet::EMPTY, |acc, &set| acc.union(set));
        Self {
            cells,
            cell_digits,
            digits,
        }
    }

    /// Returns the candidates of `cell`, empty if the cell is not covered.
    #[must_use]
    pub fn digits_of(&self, cell: Cell) -> CandidateSet {
        self.cells
            .iter()
            .position(|&c| c == cell)
            .map_or(CandidateSet::EMPTY, |i| self.cell_digits[i])
    }

    /// Returns the covered cells still holding `digit`.
    #[must_use]
    pub fn cells_with(&self, digit: u8) -> ArrayVec<[Cell; 4]> {
        self.cells
            .iter()
            .zip(self.cell_digits.iter())
            .filter(|(_, set)| set.contains(digit))
            .map(|(&cell, _)| cell)
            .collect()
    }
}

/// A node of the link graph.
///
/// The closed set of variants keeps type-specific behavior in a handful
/// of exhaustive matches instead of an open hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum GraphElement {
    /// One candidate of one cell.
    Possibility(CellPossibility),
    /// A pointing/claiming group.
    Group(PossibilityGroup),
    /// An almost-locked set.
    AlmostLockedSet(AlmostLockedSet),
}

impl GraphElement {
    /// Returns the cells the element covers.
    #[must_use]
    pub fn cells(&self) -> ArrayVec<[Cell; 4]> {
        match self {
            Self::Possibility(cp) => ArrayVec::from_iter([cp.cell]),
            Self::Group(group) => group.cells.iter().copied().collect(),
            Self::AlmostLockedSet(als) => als.cells,
        }
    }

    /// Returns the digits the element covers.
    #[must_use]
    pub fn digits(&self) -> CandidateSet {
        match self {
            Self::Possibility(cp) => CandidateSet::from_iter([cp.digit]),
            Self::Group(group) => CandidateSet::from_iter([group.digit]),
            Self::AlmostLockedSet(als) => als.digits,
        }
    }

    /// Returns the covered cells still holding `digit`.
    #[must_use]
    pub fn cells_with(&self, digit: u8) -> ArrayVec<[Cell; 4]> {
        match self {
            Self::Possibility(cp) => {
                if cp.digit == digit {
                    ArrayVec::from_iter([cp.cell])
                } else {
                    ArrayVec::new()
                }
            }
            Self::Group(group) => {
                if group.digit == digit {
                    group.cells.iter().copied().collect()
                } else {
                    ArrayVec::new()
                }
            }
            Self::AlmostLockedSet(als) => als.cells_with(digit),
        }
    }

    /// Returns the element's degrees of freedom, used for link-strength
    /// classification.
    #[must_use]
    pub fn rank(&self) -> usize {
        match self {
            Self::Possibility(_) => 1,
            Self::Group(group) => group.cells.len(),
            Self::AlmostLockedSet(als) => als.digits.len(),
        }
    }
}

impl From<CellPossibility> for GraphElement {
    fn from(cp: CellPossibility) -> Self {
        Self::Possibility(cp)
    }
}

impl Display for GraphElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Possibility(cp) => Display::fmt(cp, f),
            Self::Group(group) => {
                write!(f, "{}{{", group.digit)?;
                for (i, cell) in group.cells.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{cell}")?;
                }
                write!(f, "}}")
            }
            Self::AlmostLockedSet(als) => {
                write!(f, "als{}{{", als.digits)?;
                for (i, cell) in als.cells.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{cell}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> PossibilityGroup {
        PossibilityGroup::new(
            4,
            ArrayVec::from_iter([Cell::new(0, 2), Cell::new(0, 0)]),
        )
    }

    fn als() -> AlmostLockedSet {
        AlmostLockedSet::new(
            ArrayVec::from_iter([Cell::new(3, 0), Cell::new(3, 1)]),
            ArrayVec::from_iter([
                CandidateSet::from_iter([1, 2]),
                CandidateSet::from_iter([2, 3]),
            ]),
        )
    }

    #[test]
    fn test_group_is_sorted() {
        let group = group();
        assert_eq!(
            group.cells.iter().copied().collect::<Vec<_>>(),
            vec![Cell::new(0, 0), Cell::new(0, 2)]
        );
    }

    #[test]
    fn test_als_digits() {
        let als = als();
        assert_eq!(als.digits, CandidateSet::from_iter([1, 2, 3]));
        assert_eq!(als.digits_of(Cell::new(3, 0)), CandidateSet::from_iter([1, 2]));
        assert!(als.digits_of(Cell::new(8, 8)).is_empty());
        assert_eq!(als.cells_with(2).len(), 2);
        assert_eq!(als.cells_with(3).len(), 1);
    }

    #[test]
    fn test_element_rank() {
        let possibility = GraphElement::from(CellPossibility::from_coords(0, 0, 5));
        assert_eq!(possibility.rank(), 1);
        assert_eq!(GraphElement::Group(group()).rank(), 2);
        assert_eq!(GraphElement::AlmostLockedSet(als()).rank(), 3);
    }

    #[test]
    fn test_cells_with() {
        let element = GraphElement::Group(group());
        assert_eq!(element.cells_with(4).len(), 2);
        assert!(element.cells_with(5).is_empty());
    }

    #[test]
    fn test_display() {
        let element = GraphElement::from(CellPossibility::from_coords(0, 0, 5));
        assert_eq!(element.to_string(), "5r1c1");
        assert_eq!(GraphElement::Group(group()).to_string(), "4{r1c1 r1c3}");
    }
}
