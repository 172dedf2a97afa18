//! The wave: per-cell pattern possibilities and derived counters
//!
//! The wave is pure bookkeeping. It never decides anything by itself; the
//! propagation engine and the executor mutate it through `ban`/`unban` and
//! read the counters back to classify the solve.

use crate::algorithm::bitset::PatternBitset;
use crate::math::entropy::EntropyMemo;
use rand::rngs::StdRng;

/// Per-cell possibility bitsets plus the counters the solver steers by
#[derive(Clone, Debug)]
pub struct Wave {
    possible: Vec<PatternBitset>,
    remaining: Vec<usize>,
    memo: EntropyMemo,
    active: Vec<bool>,
    pattern_count: usize,
    active_cells: usize,
    undecided_cells: usize,
    empty_cells: usize,
}

impl Wave {
    /// Create a wave with every pattern possible in every active cell
    ///
    /// Masked-out cells are carried in the vectors for index stability but
    /// are born decided: they are never selected and never counted.
    pub fn new(frequencies: &[f64], active: Vec<bool>, rng: &mut StdRng) -> Self {
        let cell_count = active.len();
        let pattern_count = frequencies.len();
        let active_cells = active.iter().filter(|&&a| a).count();
        let undecided_cells = if pattern_count > 1 { active_cells } else { 0 };

        Self {
            possible: vec![PatternBitset::all(pattern_count); cell_count],
            remaining: vec![pattern_count; cell_count],
            memo: EntropyMemo::new(frequencies, cell_count, rng),
            active,
            pattern_count,
            active_cells,
            undecided_cells,
            empty_cells: 0,
        }
    }

    /// Number of patterns the wave was built over
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Number of cells, masked or not
    pub fn cell_count(&self) -> usize {
        self.possible.len()
    }

    /// Number of unmasked cells
    pub const fn active_cells(&self) -> usize {
        self.active_cells
    }

    /// Whether the cell participates in the solve
    pub fn is_active(&self, cell: usize) -> bool {
        self.active[cell]
    }

    /// Whether a pattern remains possible at a cell
    pub fn possible(&self, cell: usize, pattern: usize) -> bool {
        self.possible[cell].contains(pattern)
    }

    /// Number of patterns remaining at a cell
    pub fn remaining(&self, cell: usize) -> usize {
        self.remaining[cell]
    }

    /// The possibility bitset of a cell
    pub fn bitset(&self, cell: usize) -> &PatternBitset {
        &self.possible[cell]
    }

    /// Iterate over the patterns remaining at a cell
    pub fn patterns_at(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.possible[cell].iter()
    }

    /// The single remaining pattern of a decided cell
    pub fn first_pattern(&self, cell: usize) -> Option<usize> {
        self.possible[cell].first()
    }

    /// Entropy plus tie-break noise, for cell comparisons
    pub fn entropy_key(&self, cell: usize) -> f64 {
        self.memo.entropy_key(cell)
    }

    /// Shannon entropy of a cell's remaining weights
    pub fn entropy(&self, cell: usize) -> f64 {
        self.memo.entropy(cell)
    }

    /// Active cells that still allow more than one pattern
    pub const fn undecided_cells(&self) -> usize {
        self.undecided_cells
    }

    /// Active cells with no pattern left (contradictions)
    pub const fn empty_cells(&self) -> usize {
        self.empty_cells
    }

    /// Active cells collapsed to exactly one pattern
    pub const fn decided_cells(&self) -> usize {
        self.active_cells - self.undecided_cells - self.empty_cells
    }

    /// Remove a pattern from a cell, returning whether the cell emptied
    ///
    /// The caller is responsible for only banning patterns that are still
    /// possible; double bans would corrupt the counters.
    pub fn ban(&mut self, cell: usize, pattern: usize) -> bool {
        debug_assert!(self.possible[cell].contains(pattern));
        self.possible[cell].remove(pattern);
        self.remaining[cell] -= 1;
        self.memo.remove(cell, pattern);
        match self.remaining[cell] {
            1 => {
                self.undecided_cells -= 1;
                false
            }
            0 => {
                self.empty_cells += 1;
                true
            }
            _ => false,
        }
    }

    /// Inverse of [`Wave::ban`], used during backtracking
    pub fn unban(&mut self, cell: usize, pattern: usize) {
        debug_assert!(!self.possible[cell].contains(pattern));
        self.possible[cell].insert(pattern);
        self.remaining[cell] += 1;
        self.memo.restore(cell, pattern);
        match self.remaining[cell] {
            1 => self.empty_cells -= 1,
            2 => self.undecided_cells += 1,
            _ => {}
        }
    }
}
