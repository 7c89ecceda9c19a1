//! Bit-packed candidate sets for a single cell.

use std::{
    fmt::{self, Display},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
};

/// A set of candidate digits for one cell.
///
/// The set is packed into a `u16` with bit 0 reserved, so a digit's bit
/// index is the digit itself. Digits 1 through 15 are representable;
/// classic 9x9 grids use 1 through 9.
///
/// # Examples
///
/// ```
/// use lacework_core::CandidateSet;
///
/// let mut set = CandidateSet::new();
/// set.insert(4);
/// set.insert(7);
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(4));
/// assert!(!set.contains(5));
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![4, 7]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateSet(u16);

impl CandidateSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);
    /// Digits 1 through 9, the full set for a classic grid.
    pub const CLASSIC: Self = Self(0b11_1111_1110);

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Creates a set from a raw bit pattern.
    ///
    /// Bit 0 is reserved and must be clear.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        debug_assert!(bits & 1 == 0);
        Self(bits)
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set contains no digits.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `digit` is in the set.
    #[must_use]
    pub const fn contains(self, digit: u8) -> bool {
        debug_assert!(digit >= 1 && digit <= 15);
        self.0 & (1 << digit) != 0
    }

    /// Adds `digit` to the set.
    pub const fn insert(&mut self, digit: u8) {
        debug_assert!(digit >= 1 && digit <= 15);
        self.0 |= 1 << digit;
    }

    /// Removes `digit` from the set.
    pub const fn remove(&mut self, digit: u8) {
        debug_assert!(digit >= 1 && digit <= 15);
        self.0 &= !(1 << digit);
    }

    /// Returns the smallest digit in the set, if any.
    #[must_use]
    pub fn first(self) -> Option<u8> {
        (!self.is_empty()).then(|| self.0.trailing_zeros() as u8)
    }

    /// Returns the digits present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the digits present in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the digits present in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns `true` if every digit of `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Iterates over the digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        DigitIter(self.0)
    }
}

impl FromIterator<u8> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = Self::new();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl BitOr for CandidateSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for CandidateSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CandidateSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for CandidateSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.iter() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

struct DigitIter(u16);

impl Iterator for DigitIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let digit = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(digit)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut set = CandidateSet::new();
        assert!(set.is_empty());

        set.insert(1);
        set.insert(9);
        assert_eq!(set.len(), 2);
        assert!(set.contains(1));
        assert!(set.contains(9));
        assert!(!set.contains(5));

        set.remove(1);
        assert!(!set.contains(1));
        assert_eq!(set.first(), Some(9));
    }

    #[test]
    fn test_set_operations() {
        let a = CandidateSet::from_iter([1, 2, 3]);
        let b = CandidateSet::from_iter([2, 3, 4]);

        assert_eq!(a.union(b), CandidateSet::from_iter([1, 2, 3, 4]));
        assert_eq!(a.intersection(b), CandidateSet::from_iter([2, 3]));
        assert_eq!(a.difference(b), CandidateSet::from_iter([1]));
        assert!(a.is_superset(CandidateSet::from_iter([1, 3])));
        assert!(!a.is_superset(b));
    }

    #[test]
    fn test_classic_constant() {
        assert_eq!(CandidateSet::CLASSIC.len(), 9);
        for digit in 1..=9 {
            assert!(CandidateSet::CLASSIC.contains(digit));
        }
        assert_eq!(
            CandidateSet::CLASSIC.iter().collect::<Vec<_>>(),
            (1..=9).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_display() {
        let set = CandidateSet::from_iter([4, 7]);
        assert_eq!(set.to_string(), "47");
        assert_eq!(CandidateSet::EMPTY.to_string(), "");
    }

    proptest! {
        #[test]
        fn removal_is_idempotent(bits in 0_u16..1 << 15, digit in 1_u8..=15) {
            let mut set = CandidateSet::from_bits(bits << 1);
            set.remove(digit);
            let once = set;
            set.remove(digit);
            prop_assert_eq!(set, once);
        }

        #[test]
        fn iteration_matches_membership(bits in 0_u16..1 << 15) {
            let set = CandidateSet::from_bits(bits << 1);
            let digits: Vec<u8> = set.iter().collect();
            prop_assert_eq!(digits.len(), set.len());
            for digit in digits {
                prop_assert!(set.contains(digit));
            }
        }
    }
}
