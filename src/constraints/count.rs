//! Run-length constraint: cap consecutive identical tiles along an axis

use crate::algorithm::executor::{Status, TilePropagator};
use crate::constraints::TileConstraint;
use crate::io::error::{Result, invalid_parameter};
use crate::model::tiles::{Tile, TileValue};
use crate::spatial::directions::Axis;

/// Bans tiles that would extend a run past a limit
///
/// A run is a maximal sequence of cells along the axis where only tiles
/// from the set remain. Runs at the limit get the set banned on both
/// flanks; a run past the limit is a contradiction, as is a fully-run
/// periodic line longer than the limit.
#[derive(Clone, Debug)]
pub struct MaxConsecutiveConstraint<V> {
    /// The tiles counted as one run class
    pub tiles: Vec<Tile<V>>,
    /// The axis runs extend along
    pub axis: Axis,
    /// Maximum allowed run length
    pub max_count: usize,
}

impl<V: TileValue> TileConstraint<V> for MaxConsecutiveConstraint<V> {
    fn init(&mut self, _propagator: &mut TilePropagator<V>) -> Result<()> {
        if self.max_count == 0 {
            return Err(invalid_parameter(
                "max_count",
                &self.max_count,
                &"must be at least 1",
            ));
        }
        Ok(())
    }

    fn check(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let topology = propagator.topology();
        let axis = self.axis.index();
        let dimensions = topology.dimensions();
        let length = dimensions[axis];
        let periodic = topology.periodicity()[axis];

        let cross = [(axis + 1) % 3, (axis + 2) % 3];
        for b in 0..dimensions[cross[1]] {
            for a in 0..dimensions[cross[0]] {
                let mut line = Vec::with_capacity(length);
                for i in 0..length {
                    let mut point = [0usize; 3];
                    point[axis] = i;
                    point[cross[0]] = a;
                    point[cross[1]] = b;
                    line.push(point);
                }

                let mut committed = Vec::with_capacity(length);
                for point in &line {
                    let (_, selected) =
                        propagator.banned_selected(point[0], point[1], point[2], &self.tiles)?;
                    committed.push(selected);
                }

                self.enforce_line(propagator, &line, &committed, periodic)?;
                if propagator.status() == Status::Contradiction {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

impl<V: TileValue> MaxConsecutiveConstraint<V> {
    fn enforce_line(
        &self,
        propagator: &mut TilePropagator<V>,
        line: &[[usize; 3]],
        committed: &[bool],
        periodic: bool,
    ) -> Result<()> {
        let length = line.len();
        if committed.iter().all(|&c| c) {
            if length > self.max_count {
                propagator.set_contradiction();
            }
            return Ok(());
        }

        // On periodic lines, start scanning at a gap so runs crossing the
        // seam are seen whole; elsewhere the line ends are real boundaries
        let start = if periodic {
            committed.iter().position(|&c| !c).unwrap_or(0)
        } else {
            0
        };
        let mut i = 0;
        while i < length {
            let position = (start + i) % length;
            if !committed[position] {
                i += 1;
                continue;
            }
            let mut run = 0;
            while i + run < length && committed[(start + i + run) % length] {
                run += 1;
            }
            if run > self.max_count {
                propagator.set_contradiction();
                return Ok(());
            }
            if run == self.max_count {
                let before = (start + i + length - 1) % length;
                let after = (start + i + run) % length;
                let wraps_before = start + i == 0 && !periodic;
                let wraps_after = start + i + run >= length && !periodic;
                if !wraps_before && !committed[before] {
                    let point = line[before];
                    propagator.ban_tiles(point[0], point[1], point[2], &self.tiles)?;
                }
                if !wraps_after && !committed[after] {
                    let point = line[after];
                    propagator.ban_tiles(point[0], point[1], point[2], &self.tiles)?;
                }
            }
            i += run;
        }
        Ok(())
    }
}
