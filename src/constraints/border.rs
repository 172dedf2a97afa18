//! Border constraint: ban or force tiles along the sides of the grid

use crate::algorithm::executor::TilePropagator;
use crate::constraints::TileConstraint;
use crate::io::error::Result;
use crate::model::tiles::{Tile, TileValue};
use std::ops::BitOr;

/// A set of grid faces, combinable with `|`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideSet(u8);

impl SideSet {
    /// The x = 0 face
    pub const X_MIN: Self = Self(1);
    /// The x = width - 1 face
    pub const X_MAX: Self = Self(1 << 1);
    /// The y = 0 face
    pub const Y_MIN: Self = Self(1 << 2);
    /// The y = height - 1 face
    pub const Y_MAX: Self = Self(1 << 3);
    /// The z = 0 face
    pub const Z_MIN: Self = Self(1 << 4);
    /// The z = depth - 1 face
    pub const Z_MAX: Self = Self(1 << 5);
    /// Every face
    pub const ALL: Self = Self(0b11_1111);

    /// Whether any of the flagged faces contains the point
    pub fn matches(self, point: [usize; 3], dimensions: [usize; 3]) -> bool {
        let on = [
            (Self::X_MIN, point[0] == 0),
            (Self::X_MAX, point[0] == dimensions[0] - 1),
            (Self::Y_MIN, point[1] == 0),
            (Self::Y_MAX, point[1] == dimensions[1] - 1),
            (Self::Z_MIN, point[2] == 0),
            (Self::Z_MAX, point[2] == dimensions[2] - 1),
        ];
        on.iter().any(|&(side, hit)| hit && self.0 & side.0 != 0)
    }
}

impl BitOr for SideSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Bans or forces a tile set on selected grid faces at initialization
#[derive(Clone, Debug)]
pub struct BorderConstraint<V> {
    /// The tiles the constraint acts on
    pub tiles: Vec<Tile<V>>,
    /// Faces the constraint applies to
    pub sides: SideSet,
    /// Apply to the complement of the faces instead
    pub invert: bool,
    /// Ban the tiles instead of forcing them
    pub ban: bool,
}

impl<V: TileValue> TileConstraint<V> for BorderConstraint<V> {
    fn init(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let topology = propagator.topology();
        let dimensions = topology.dimensions();
        let points: Vec<[usize; 3]> = topology
            .active_indices()
            .map(|index| topology.coordinates(index))
            .collect();

        for point in points {
            let on_side = self.sides.matches(point, dimensions);
            if on_side == self.invert {
                continue;
            }
            let [x, y, z] = point;
            if self.ban {
                propagator.ban_tiles(x, y, z, &self.tiles)?;
            } else {
                propagator.select_tiles(x, y, z, &self.tiles)?;
            }
        }
        Ok(())
    }
}
