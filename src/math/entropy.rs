//! Incremental Shannon entropy bookkeeping for wave cells
//!
//! Each cell's entropy over its remaining pattern weights is
//! `ln(Σw) − (Σ w·ln w)/Σw`. Both sums are maintained incrementally as
//! patterns are banned and restored; the logarithm is only taken when a
//! cell is actually compared.

use rand::Rng;
use rand::rngs::StdRng;

/// Amplitude of the per-cell tie-break noise
const TIE_BREAK_NOISE: f64 = 1e-6;

/// Per-cell weight sums plus deterministic tie-break noise
#[derive(Clone, Debug)]
pub struct EntropyMemo {
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    sum_weights: Vec<f64>,
    sum_weight_log_weights: Vec<f64>,
    noise: Vec<f64>,
}

impl EntropyMemo {
    /// Initialize sums for cells that still allow every pattern
    ///
    /// The noise is sampled once here so that entropy ties break the same
    /// way for the lifetime of the wave.
    pub fn new(frequencies: &[f64], cell_count: usize, rng: &mut StdRng) -> Self {
        let weight_log_weights: Vec<f64> =
            frequencies.iter().map(|&w| w * w.ln()).collect();
        let total_weight: f64 = frequencies.iter().sum();
        let total_weight_log_weight: f64 = weight_log_weights.iter().sum();

        let noise = (0..cell_count)
            .map(|_| rng.random::<f64>() * TIE_BREAK_NOISE)
            .collect();

        Self {
            weights: frequencies.to_vec(),
            weight_log_weights,
            sum_weights: vec![total_weight; cell_count],
            sum_weight_log_weights: vec![total_weight_log_weight; cell_count],
            noise,
        }
    }

    /// Subtract a pattern's weight contribution from a cell
    pub fn remove(&mut self, cell: usize, pattern: usize) {
        self.sum_weights[cell] -= self.weights[pattern];
        self.sum_weight_log_weights[cell] -= self.weight_log_weights[pattern];
    }

    /// Add a pattern's weight contribution back to a cell
    pub fn restore(&mut self, cell: usize, pattern: usize) {
        self.sum_weights[cell] += self.weights[pattern];
        self.sum_weight_log_weights[cell] += self.weight_log_weights[pattern];
    }

    /// Shannon entropy of the cell's remaining weights
    pub fn entropy(&self, cell: usize) -> f64 {
        let sum = self.sum_weights[cell];
        if sum <= 0.0 {
            return 0.0;
        }
        sum.ln() - self.sum_weight_log_weights[cell] / sum
    }

    /// Entropy plus the cell's tie-break noise, for comparisons only
    pub fn entropy_key(&self, cell: usize) -> f64 {
        self.entropy(cell) + self.noise[cell]
    }

    /// Sum of the remaining weights at a cell
    pub fn sum_weights(&self, cell: usize) -> f64 {
        self.sum_weights[cell]
    }
}
