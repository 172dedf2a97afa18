//! Adjacent tile model: explicit per-direction tile pair rules

use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::model::mapping::{PatternModel, TileModel, TileModelMapping};
use crate::model::rotation::TileRotation;
use crate::model::tiles::{Tile, TileValue};
use crate::spatial::directions::DirectionSet;
use crate::spatial::topology::GridTopology;
use std::collections::{HashMap, HashSet};

/// Tile model declaring which ordered tile pairs may sit next to each other
///
/// Every registered tile becomes one pattern. Adjacencies are stored per
/// direction as ordered pairs `(src, dst)` meaning `dst` may appear one step
/// in that direction from `src`; the mirrored pair is recorded automatically
/// so the compiled table stays consistent.
#[derive(Clone, Debug)]
pub struct AdjacentModel<V> {
    directions: DirectionSet,
    tiles: Vec<Tile<V>>,
    tile_ids: HashMap<Tile<V>, usize>,
    frequencies: Vec<f64>,
    adjacencies: Vec<HashSet<(usize, usize)>>,
    tile_rotation: Option<TileRotation<V>>,
}

impl<V: TileValue> AdjacentModel<V> {
    /// Create an empty model over a direction set
    pub fn new(directions: DirectionSet) -> Self {
        Self {
            directions,
            tiles: Vec::new(),
            tile_ids: HashMap::new(),
            frequencies: Vec::new(),
            adjacencies: vec![HashSet::new(); directions.count()],
            tile_rotation: None,
        }
    }

    /// Register a tile with an explicit frequency
    ///
    /// Re-registering a tile overwrites its frequency.
    ///
    /// # Errors
    ///
    /// Returns an error unless the frequency is positive and finite
    pub fn add_tile(&mut self, tile: Tile<V>, frequency: f64) -> Result<()> {
        if !(frequency > 0.0 && frequency.is_finite()) {
            return Err(invalid_parameter(
                "frequency",
                &frequency,
                &"must be positive and finite",
            ));
        }
        let id = self.ensure_tile(tile);
        self.frequencies[id] = frequency;
        Ok(())
    }

    /// Set the frequency of an already-registered tile
    ///
    /// # Errors
    ///
    /// Returns an error unless the frequency is positive and finite
    pub fn set_frequency(&mut self, tile: Tile<V>, frequency: f64) -> Result<()> {
        self.add_tile(tile, frequency)
    }

    /// Registered tiles in insertion order
    pub fn tiles(&self) -> &[Tile<V>] {
        &self.tiles
    }

    /// Declare that `dst` may appear one step in `direction` from `src`
    ///
    /// Unregistered tiles are added with frequency 1. The mirrored pair in
    /// the opposite direction is declared implicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction index is out of bounds
    pub fn add_adjacency(
        &mut self,
        src: &Tile<V>,
        dst: &Tile<V>,
        direction: usize,
    ) -> Result<()> {
        if direction >= self.directions.count() {
            return Err(SolverError::UnknownDirection {
                direction,
                count: self.directions.count(),
            });
        }
        let src_id = self.ensure_tile(src.clone());
        let dst_id = self.ensure_tile(dst.clone());
        self.adjacencies[direction].insert((src_id, dst_id));
        self.adjacencies[self.directions.opposite(direction)].insert((dst_id, src_id));
        Ok(())
    }

    /// Declare an adjacency and expand it through a rotation group
    ///
    /// For every group element the pair is re-declared with both tiles and
    /// the direction rotated. Expansions whose tile transform is missing, or
    /// whose rotated direction leaves the direction set, are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction index is out of bounds
    pub fn add_adjacency_with_rotations(
        &mut self,
        rotations: &TileRotation<V>,
        src: &Tile<V>,
        dst: &Tile<V>,
        direction: usize,
    ) -> Result<()> {
        if direction >= self.directions.count() {
            return Err(SolverError::UnknownDirection {
                direction,
                count: self.directions.count(),
            });
        }
        for rotation in rotations.group().elements() {
            let (Some(rotated_src), Some(rotated_dst)) = (
                rotations.rotate(src, rotation),
                rotations.rotate(dst, rotation),
            ) else {
                continue;
            };
            let Some(rotated_direction) = self.directions.rotate(direction, rotation) else {
                continue;
            };
            self.add_adjacency(&rotated_src, &rotated_dst, rotated_direction)?;
        }
        self.tile_rotation = Some(rotations.clone());
        Ok(())
    }

    fn ensure_tile(&mut self, tile: Tile<V>) -> usize {
        if let Some(&id) = self.tile_ids.get(&tile) {
            return id;
        }
        let id = self.tiles.len();
        self.tile_ids.insert(tile.clone(), id);
        self.tiles.push(tile);
        self.frequencies.push(1.0);
        id
    }
}

impl<V: TileValue> TileModel<V> for AdjacentModel<V> {
    fn build_mapping(&self, topology: &GridTopology) -> Result<TileModelMapping<V>> {
        if topology.directions() != self.directions {
            return Err(SolverError::TopologyMismatch {
                expected: format!("{:?} directions", self.directions),
                actual: format!("{:?} directions", topology.directions()),
            });
        }
        if self.tiles.is_empty() {
            return Err(SolverError::EmptyPatternSet { model: "adjacent" });
        }

        let pattern_count = self.tiles.len();
        let mut propagator =
            vec![vec![Vec::new(); self.directions.count()]; pattern_count];
        for (direction, pairs) in self.adjacencies.iter().enumerate() {
            for &(src, dst) in pairs {
                propagator[src][direction].push(dst);
            }
        }

        let mut tiles_to_patterns = HashMap::new();
        for (id, tile) in self.tiles.iter().enumerate() {
            tiles_to_patterns.insert(tile.clone(), vec![id]);
        }

        Ok(TileModelMapping {
            pattern_model: PatternModel::new(self.frequencies.clone(), propagator),
            pattern_topology: topology.clone(),
            tiles_to_patterns_by_offset: HashMap::from([(0, tiles_to_patterns)]),
            patterns_to_tiles_by_offset: HashMap::from([(0, self.tiles.clone())]),
            window: [1, 1, 1],
            tile_rotation: self.tile_rotation.clone(),
        })
    }
}
