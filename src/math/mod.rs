//! Mathematical utilities for the solver

/// Incremental entropy bookkeeping
pub mod entropy;
/// Weighted sampling
pub mod probability;

pub use entropy::EntropyMemo;
