use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset tracking which patterns remain possible
///
/// Pattern ids are zero-based indices into the compiled pattern set.
/// Provides O(1) membership testing and word-wise set operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBitset {
    bits: BitVec,
    pattern_count: usize,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn none(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
            pattern_count,
        }
    }

    /// Create a bitset containing every pattern
    pub fn all(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
            pattern_count,
        }
    }

    /// Insert a pattern id
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.pattern_count {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern id
    pub fn remove(&mut self, pattern: usize) {
        if pattern < self.pattern_count {
            self.bits.set(pattern, false);
        }
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity of the set
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Iterate over the pattern ids present
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Lowest pattern id present, if any
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Extract all pattern ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PatternBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatternBitset({} patterns: {:?})", self.count(), self.to_vec())
    }
}
