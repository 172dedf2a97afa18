//! Compiled pattern model and the tile-space to pattern-space mapping
//!
//! Pattern ids are opaque integers local to one compilation. The mapping
//! translates public tile coordinates into pattern-cell coordinates plus a
//! window offset, and resolves tiles to the patterns that realize them at
//! that offset.

use crate::io::error::{Result, missing_transform, unknown_tile};
use crate::model::rotation::TileRotation;
use crate::model::tiles::{Tile, TileValue};
use crate::spatial::topology::GridTopology;
use std::collections::HashMap;

/// A compiled pattern set: weights plus the per-direction compatibility table
///
/// The table is consistent by construction:
/// `q ∈ propagator[p][d]` exactly when `p ∈ propagator[q][opposite(d)]`.
#[derive(Clone, Debug)]
pub struct PatternModel {
    /// Positive weight per pattern, used for entropy and sampling
    pub frequencies: Vec<f64>,
    /// `propagator[pattern][direction]` lists the patterns allowed one step away
    pub propagator: Vec<Vec<Vec<usize>>>,
}

impl PatternModel {
    /// Create a model, normalizing each compatibility list to sorted-unique
    pub fn new(frequencies: Vec<f64>, mut propagator: Vec<Vec<Vec<usize>>>) -> Self {
        for per_direction in &mut propagator {
            for list in per_direction {
                list.sort_unstable();
                list.dedup();
            }
        }
        Self {
            frequencies,
            propagator,
        }
    }

    /// Number of patterns
    pub const fn pattern_count(&self) -> usize {
        self.frequencies.len()
    }
}

/// Connects tile space to pattern space for one compiled model
///
/// For adjacent models this is the identity with a single offset. For
/// overlapping models the pattern grid shrinks along non-periodic axes and
/// boundary tile coordinates resolve to an edge pattern cell with a non-zero
/// window offset.
#[derive(Clone, Debug)]
pub struct TileModelMapping<V> {
    /// The compiled pattern set
    pub pattern_model: PatternModel,
    /// Topology the wave runs on (pattern space)
    pub pattern_topology: GridTopology,
    /// Per offset: which patterns realize a tile at that window slot
    pub tiles_to_patterns_by_offset: HashMap<usize, HashMap<Tile<V>, Vec<usize>>>,
    /// Per offset: the tile each pattern contributes at that window slot
    pub patterns_to_tiles_by_offset: HashMap<usize, Vec<Tile<V>>>,
    /// Window dimensions, `[1, 1, 1]` for adjacent models
    pub window: [usize; 3],
    /// Rotation map used to canonicalize rotated tiles before lookup
    pub tile_rotation: Option<TileRotation<V>>,
}

impl<V: TileValue> TileModelMapping<V> {
    /// Translate a tile coordinate into (pattern cell index, window offset)
    ///
    /// Coordinates past the pattern grid clamp to its edge; the remainder
    /// becomes the offset into the pattern window.
    pub fn tile_to_pattern(&self, point: [usize; 3]) -> (usize, usize) {
        let dims = self.pattern_topology.dimensions();
        let mut cell = [0usize; 3];
        let mut offset = [0usize; 3];
        for axis in 0..3 {
            cell[axis] = point[axis].min(dims[axis] - 1);
            offset[axis] = point[axis] - cell[axis];
        }
        let index = self.pattern_topology.index(cell[0], cell[1], cell[2]);
        let packed = offset[0] + self.window[0] * (offset[1] + self.window[1] * offset[2]);
        (index, packed)
    }

    /// Patterns that realize a tile at the given offset
    ///
    /// Rotated tiles absent from the table are canonicalized through the
    /// model's rotation map first.
    ///
    /// # Errors
    ///
    /// Returns an error when the tile is not part of the model, or when
    /// canonicalization fails under a `Missing` treatment
    pub fn patterns_for_tile(&self, offset: usize, tile: &Tile<V>) -> Result<&[usize]> {
        let table = self
            .tiles_to_patterns_by_offset
            .get(&offset)
            .ok_or_else(|| unknown_tile(tile))?;
        if let Some(patterns) = table.get(tile) {
            return Ok(patterns);
        }
        if let (Tile::Rotated { rotation, .. }, Some(tile_rotation)) =
            (tile, self.tile_rotation.as_ref())
        {
            let canonical = tile_rotation
                .canonical(tile)
                .ok_or_else(|| missing_transform(tile, rotation))?;
            if let Some(patterns) = table.get(&canonical) {
                return Ok(patterns);
            }
        }
        Err(unknown_tile(tile))
    }

    /// The tile a pattern contributes at the given offset
    pub fn tile_at(&self, offset: usize, pattern: usize) -> Option<&Tile<V>> {
        self.patterns_to_tiles_by_offset
            .get(&offset)?
            .get(pattern)
    }
}

/// The two tile model variants compile through this interface
pub trait TileModel<V> {
    /// Compile the model against an output topology
    ///
    /// # Errors
    ///
    /// Returns an error when the model is inconsistent with the topology or
    /// compiles to an empty pattern set
    fn build_mapping(&self, topology: &GridTopology) -> Result<TileModelMapping<V>>;
}
