//! Fixed tile constraint: pin a tile set to a point at initialization

use crate::algorithm::executor::TilePropagator;
use crate::constraints::TileConstraint;
use crate::io::error::{Result, invalid_parameter};
use crate::model::tiles::{Tile, TileValue};

/// Selects a tile set at a given point, or at a random active cell
#[derive(Clone, Debug)]
pub struct FixedTileConstraint<V> {
    /// The tiles to select
    pub tiles: Vec<Tile<V>>,
    /// Where to place them; a random active cell when omitted
    pub point: Option<[usize; 3]>,
}

impl<V: TileValue> TileConstraint<V> for FixedTileConstraint<V> {
    fn init(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let point = match self.point {
            Some(point) => point,
            None => propagator.random_active_point().ok_or_else(|| {
                invalid_parameter("point", &"none", &"topology has no active cells")
            })?,
        };
        propagator.select_tiles(point[0], point[1], point[2], &self.tiles)
    }
}
