//! Tile models and their compilation into pattern space
//!
//! This module contains everything that happens before the solver runs:
//! - Tile values and the rotated-tile sum type
//! - The rotation group and per-tile rotation behavior
//! - The adjacent and overlapping tile models
//! - Pattern compilation and the tile-to-pattern mapping

/// Adjacent tile model with explicit pair rules
pub mod adjacent;
/// Compiled pattern model and tile-space mapping
pub mod mapping;
/// Overlapping window model extracted from samples
pub mod overlapping;
/// Rotation group and tile rotation maps
pub mod rotation;
/// Tile values and the rotated-tile type
pub mod tiles;

pub use adjacent::AdjacentModel;
pub use mapping::{PatternModel, TileModel, TileModelMapping};
pub use overlapping::OverlappingModel;
pub use rotation::{Rotation, RotationGroup, TileRotation, TileRotationBuilder, TileRotationTreatment};
pub use tiles::{Tile, TileValue};
