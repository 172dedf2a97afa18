//! Grid topology: dimensions, periodicity, direction set, and cell mask
//!
//! The topology is the only component that understands coordinates. Everything
//! downstream works on flat cell indices and direction indices, which keeps
//! the wave and the propagation engine free of coordinate arithmetic.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::directions::DirectionSet;

/// Shape of the output grid together with its neighborhood structure
///
/// A masked cell is treated as lying outside the grid: it is never selected,
/// never propagated into, and `neighbor` refuses to step onto it.
#[derive(Clone, Debug)]
pub struct GridTopology {
    width: usize,
    height: usize,
    depth: usize,
    periodic: [bool; 3],
    directions: DirectionSet,
    mask: Option<Vec<bool>>,
}

impl GridTopology {
    /// Create a 2D grid with four-way adjacency
    pub fn cartesian_2d(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth: 1,
            periodic: [false; 3],
            directions: DirectionSet::Cartesian2d,
            mask: None,
        }
    }

    /// Create a 3D grid with six-way adjacency
    pub fn cartesian_3d(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            periodic: [false; 3],
            directions: DirectionSet::Cartesian3d,
            mask: None,
        }
    }

    /// Create a 2D hex grid with six-way axial adjacency
    pub fn hexagonal_2d(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth: 1,
            periodic: [false; 3],
            directions: DirectionSet::Hexagonal2d,
            mask: None,
        }
    }

    /// Set per-axis periodicity
    #[must_use]
    pub const fn with_periodicity(mut self, x: bool, y: bool, z: bool) -> Self {
        self.periodic = [x, y, z];
        self
    }

    /// Restrict the grid to the cells marked `true`
    ///
    /// # Errors
    ///
    /// Returns an error if the mask length does not match the cell count
    pub fn with_mask(mut self, mask: Vec<bool>) -> Result<Self> {
        if mask.len() != self.cell_count() {
            return Err(invalid_parameter(
                "mask",
                &mask.len(),
                &format!("expected {} cells", self.cell_count()),
            ));
        }
        self.mask = Some(mask);
        Ok(self)
    }

    /// Grid width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Grid depth (1 for 2D grids)
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Dimensions as a triple
    pub const fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }

    /// Per-axis periodicity flags
    pub const fn periodicity(&self) -> [bool; 3] {
        self.periodic
    }

    /// The direction set describing neighborhoods
    pub const fn directions(&self) -> DirectionSet {
        self.directions
    }

    /// Total number of cells, masked or not
    pub const fn cell_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Number of unmasked cells
    pub fn active_count(&self) -> usize {
        self.mask
            .as_ref()
            .map_or(self.cell_count(), |mask| mask.iter().filter(|&&a| a).count())
    }

    /// Flat index of a coordinate triple
    pub const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.width * (y + self.height * z)
    }

    /// Coordinate triple of a flat index
    pub const fn coordinates(&self, index: usize) -> [usize; 3] {
        let x = index % self.width;
        let y = (index / self.width) % self.height;
        let z = index / (self.width * self.height);
        [x, y, z]
    }

    /// Whether a coordinate triple lies inside the grid
    pub const fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Whether the cell participates in the solve (inside any mask)
    pub fn is_active(&self, index: usize) -> bool {
        self.mask.as_ref().is_none_or(|mask| mask[index])
    }

    /// The cell mask, if one was set
    pub fn mask(&self) -> Option<&[bool]> {
        self.mask.as_deref()
    }

    /// Iterator over the indices of all active cells
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cell_count()).filter(|&index| self.is_active(index))
    }

    /// Neighboring cell index in a direction
    ///
    /// Wraps on periodic axes. Returns `None` when the step leaves the grid
    /// or lands on a masked cell.
    pub fn neighbor(&self, index: usize, direction: usize) -> Option<usize> {
        let offset = self.directions.offset(direction).ok()?;
        let [x, y, z] = self.coordinates(index);
        let coords = [x as i64, y as i64, z as i64];
        let dims = [self.width as i64, self.height as i64, self.depth as i64];

        let mut stepped = [0usize; 3];
        for axis in 0..3 {
            let mut value = coords[axis] + i64::from(offset[axis]);
            if self.periodic[axis] {
                value = value.rem_euclid(dims[axis]);
            } else if value < 0 || value >= dims[axis] {
                return None;
            }
            stepped[axis] = value as usize;
        }

        let target = self.index(stepped[0], stepped[1], stepped[2]);
        if self.is_active(target) { Some(target) } else { None }
    }
}

/// Precomputed neighbor lookups for every (cell, direction) pair
///
/// Propagation queries neighbors in its innermost loop, so the topology's
/// coordinate arithmetic is flattened into one table up front.
#[derive(Clone, Debug)]
pub struct NeighborTable {
    table: Vec<Option<usize>>,
    direction_count: usize,
}

impl NeighborTable {
    /// Build the table for a topology
    pub fn new(topology: &GridTopology) -> Self {
        let direction_count = topology.directions().count();
        let mut table = Vec::with_capacity(topology.cell_count() * direction_count);
        for cell in 0..topology.cell_count() {
            for direction in 0..direction_count {
                let entry = if topology.is_active(cell) {
                    topology.neighbor(cell, direction)
                } else {
                    None
                };
                table.push(entry);
            }
        }
        Self {
            table,
            direction_count,
        }
    }

    /// Number of directions per cell
    pub const fn direction_count(&self) -> usize {
        self.direction_count
    }

    /// Neighbor of a cell in a direction, if any
    pub fn get(&self, cell: usize, direction: usize) -> Option<usize> {
        self.table[cell * self.direction_count + direction]
    }
}
