//! Wave function collapse solver over tile models using constraint propagation
//!
//! The solver takes a palette of tiles, a model describing which local tile
//! configurations are permitted (explicit adjacencies or overlapping windows
//! extracted from sample grids), and an output topology. It then searches for
//! a globally consistent tile assignment by repeatedly collapsing the
//! lowest-entropy cell and propagating the consequences, with optional
//! chronological backtracking.

#![forbid(unsafe_code)]

/// Core solver implementation including the wave, propagation, and the decision loop
pub mod algorithm;
/// Constraint hooks and the built-in constraints
pub mod constraints;
/// Error types and progress reporting
pub mod io;
/// Mathematical utilities for entropy and weighted sampling
pub mod math;
/// Tile models, rotations, and pattern compilation
pub mod model;
/// Grid topology and direction sets
pub mod spatial;

pub use algorithm::executor::{Status, TilePropagator, TilePropagatorOptions};
pub use io::error::{Result, SolverError};
pub use model::tiles::{Tile, TileValue};
