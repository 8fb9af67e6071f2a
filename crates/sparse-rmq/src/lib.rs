#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]

pub mod sparse_table;

pub use sparse_table::SparseTable;

/// An entry of the sparse table: the minimum of a window and where it sits in the input.
///
/// Entries are ordered by value alone. Comparing two windows therefore picks the smaller value,
/// and the position rides along so callers can map the answer back into the input.
#[derive(Debug, Clone, Copy)]
pub struct MinAndPos<T> {
    value: T,
    pos: u32,
}

impl<T: Copy + Ord> MinAndPos<T> {
    pub fn new(value: T, pos: u32) -> Self {
        Self { value, pos }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Position of the minimum in the input slice
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// The smaller of two entries, keeping `self` on ties
    #[inline]
    pub fn smaller(self, other: Self) -> Self {
        if other.value < self.value { other } else { self }
    }
}

impl<T: Ord> PartialEq for MinAndPos<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Ord> Eq for MinAndPos<T> {}

impl<T: Ord> PartialOrd for MinAndPos<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for MinAndPos<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_order_ignores_position() {
        let early = MinAndPos::new('b', 0);
        let late = MinAndPos::new('b', 9);
        let low = MinAndPos::new('a', 5);

        assert_eq!(early, late);
        assert!(low < late);
        assert_eq!(early.smaller(late).pos(), 0);
        assert_eq!(late.smaller(early).pos(), 9);
        assert_eq!(late.smaller(low).pos(), 5);
        assert_eq!(low.smaller(early).value(), 'a');
    }
}
