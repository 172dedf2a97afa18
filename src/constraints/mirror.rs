//! Mirror constraint: force the output to be symmetric under a reflection

use crate::algorithm::executor::TilePropagator;
use crate::constraints::TileConstraint;
use crate::io::error::{Result, invalid_parameter};
use crate::model::rotation::{Rotation, TileRotation};
use crate::model::tiles::TileValue;
use crate::spatial::directions::Axis;

/// Keeps the output invariant under reflection across the mid-plane of an axis
///
/// For every cell, a tile stays possible only while its reflection stays
/// possible at the mirrored cell. Tiles with no transform under the
/// reflection are banned outright.
#[derive(Clone, Debug)]
pub struct MirrorConstraint<V> {
    /// The axis the mirror plane is perpendicular to
    pub axis: Axis,
    /// Rotation map supplying per-tile reflections
    pub rotations: TileRotation<V>,
}

impl<V: TileValue> MirrorConstraint<V> {
    /// The group element realizing the reflection for the axis
    ///
    /// Reflecting across the y midline is reflect-x composed with a half
    /// turn.
    fn reflection(&self) -> Rotation {
        match self.axis {
            Axis::X => Rotation::new(0, true),
            _ => Rotation::new(180, true),
        }
    }

    const fn mirror_point(&self, point: [usize; 3], dimensions: [usize; 3]) -> [usize; 3] {
        let axis = self.axis.index();
        let mut mirrored = point;
        mirrored[axis] = dimensions[axis] - 1 - point[axis];
        mirrored
    }
}

impl<V: TileValue> TileConstraint<V> for MirrorConstraint<V> {
    fn init(&mut self, _propagator: &mut TilePropagator<V>) -> Result<()> {
        if matches!(self.axis, Axis::Z) {
            return Err(invalid_parameter(
                "axis",
                &"Z",
                &"mirror symmetry is limited to the x and y axes",
            ));
        }
        Ok(())
    }

    fn check(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let reflection = self.reflection();
        let topology = propagator.topology();
        let dimensions = topology.dimensions();
        let points: Vec<[usize; 3]> = topology
            .active_indices()
            .map(|index| topology.coordinates(index))
            .collect();

        for point in points {
            let mirrored = self.mirror_point(point, dimensions);
            let [x, y, z] = point;
            for tile in propagator.possible_tiles(x, y, z)? {
                let keep = self
                    .rotations
                    .rotate(&tile, reflection)
                    .is_some_and(|reflected| {
                        propagator
                            .is_banned(mirrored[0], mirrored[1], mirrored[2], &reflected)
                            .is_ok_and(|banned| !banned)
                    });
                if !keep {
                    propagator.ban(x, y, z, &tile)?;
                }
            }
        }
        Ok(())
    }
}
