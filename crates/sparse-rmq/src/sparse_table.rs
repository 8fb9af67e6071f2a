//! Implementation of Sparse Table algorithm for RMQ

use crate::MinAndPos;

/// Sparse table for RMQ
///
/// Level `k` of the table holds the minimum of every window of length `2^k`, so level 0 is the
/// input itself and level `k` has `len - 2^k + 1` entries.
#[derive(Debug, Clone)]
pub struct SparseTable<T: Copy + Ord> {
    len: usize,
    tables: Vec<Vec<MinAndPos<T>>>,
}

impl<T: Copy + Ord> SparseTable<T> {
    /// Create a new sparse table with given values
    ///
    /// # Panics
    ///
    /// If the input is empty, or longer than `u32::MAX` elements.
    pub fn new(values: &[T]) -> Self {
        let len = values.len();
        assert!(len > 0, "Input must have at least one element");
        assert!(
            len <= u32::MAX as usize,
            "Input of length {len} does not fit u32 positions"
        );

        let n_tables = len.ilog2() as usize + 1;

        let mut tables = Vec::with_capacity(n_tables);

        // Windows of length one are the values themselves
        tables.push(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| MinAndPos::new(v, i as u32))
                .collect::<Vec<_>>(),
        );

        // Each window of length 2^k is covered by two halves of length 2^(k-1)
        #[allow(
            clippy::needless_range_loop,
            reason = "Previous level is borrowed while the next one is pushed"
        )]
        for k in 1..n_tables {
            let half = 1 << (k - 1);
            let mins_km1 = &tables[k - 1];
            let len_k = len - (1 << k) + 1;
            let mut mins_k = Vec::with_capacity(len_k);

            // Give compiler a hint that i and i + half are within bounds
            assert!(len_k + half <= mins_km1.len());
            for i in 0..len_k {
                mins_k.push(mins_km1[i].smaller(mins_km1[i + half]));
            }
            tables.push(mins_k);
        }

        Self { len, tables }
    }

    /// Number of values the table was built from
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, which is `ilog2(len) + 1`
    pub fn n_levels(&self) -> usize {
        self.tables.len()
    }

    /// Minimum of every window of length `2^k`, or `None` if no such level exists
    pub fn level(&self, k: usize) -> Option<&[MinAndPos<T>]> {
        self.tables.get(k).map(Vec::as_slice)
    }

    /// Given an inclusive range `[start, end]`, returns the minimum value and its position
    ///
    /// If the minimum occurs several times in the range, which of those positions is returned is
    /// not specified.
    pub fn min_in(&self, start: u32, end: u32) -> MinAndPos<T> {
        // Hot path, so the range is only checked on debug builds
        debug_assert!(
            start <= end,
            "Start `{start}` must be less than or equal to end `{end}`"
        );
        debug_assert!(
            (end as usize) < self.len,
            "End `{end}` must be less than length {}",
            self.len
        );

        if start == end {
            return self.tables[0][start as usize];
        }

        let len = end - start + 1;
        let k = len.ilog2() as usize;

        // If length is a power of 2, one window covers the whole range
        if len.is_power_of_two() {
            return self.tables[k][start as usize];
        }

        // Otherwise, take the minimum of two overlapping windows
        let block_size = 1 << k;
        let left_min = self.tables[k][start as usize];
        let right_min = self.tables[k][end as usize + 1 - block_size];

        left_min.smaller(right_min)
    }
}
