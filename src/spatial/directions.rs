//! Direction sets describing cell neighborhoods
//!
//! Directions are laid out in positive/negative pairs so the opposite of a
//! direction is always its pair partner. All neighbor arithmetic in the
//! solver goes through unit offsets obtained here.

use crate::io::error::{Result, SolverError};
use crate::model::rotation::Rotation;

/// A coordinate axis of the output grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First coordinate
    X,
    /// Second coordinate
    Y,
    /// Third coordinate
    Z,
}

impl Axis {
    /// Index of the axis into a coordinate triple
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// The set of directions in which cells have neighbors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionSet {
    /// Four axis-aligned directions in the xy plane
    Cartesian2d,
    /// Six axis-aligned directions
    Cartesian3d,
    /// Six axial directions on a hex grid (x, y, and the x+y diagonal)
    Hexagonal2d,
}

const CARTESIAN_2D: [[i32; 3]; 4] = [[1, 0, 0], [-1, 0, 0], [0, 1, 0], [0, -1, 0]];
const CARTESIAN_3D: [[i32; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];
const HEXAGONAL_2D: [[i32; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [1, 1, 0],
    [-1, -1, 0],
];

impl DirectionSet {
    /// Number of directions in the set
    pub const fn count(self) -> usize {
        match self {
            Self::Cartesian2d => 4,
            Self::Cartesian3d | Self::Hexagonal2d => 6,
        }
    }

    /// Unit offsets for every direction, in index order
    pub const fn offsets(self) -> &'static [[i32; 3]] {
        match self {
            Self::Cartesian2d => &CARTESIAN_2D,
            Self::Cartesian3d => &CARTESIAN_3D,
            Self::Hexagonal2d => &HEXAGONAL_2D,
        }
    }

    /// Unit offset of a single direction
    ///
    /// # Errors
    ///
    /// Returns an error if the direction index is out of bounds
    pub fn offset(self, direction: usize) -> Result<[i32; 3]> {
        self.offsets()
            .get(direction)
            .copied()
            .ok_or(SolverError::UnknownDirection {
                direction,
                count: self.count(),
            })
    }

    /// The direction pointing the opposite way
    ///
    /// Directions are laid out in +/- pairs, so this is the pair partner.
    pub const fn opposite(self, direction: usize) -> usize {
        direction ^ 1
    }

    /// Whether the set only steps along coordinate axes
    pub const fn is_cartesian(self) -> bool {
        matches!(self, Self::Cartesian2d | Self::Cartesian3d)
    }

    /// Image of a direction under a rotation group element
    ///
    /// Rotations act in the xy plane. Returns `None` when the rotated offset
    /// is not a member of this set, which happens for 90-degree rotations on
    /// hex grids.
    pub fn rotate(self, direction: usize, rotation: Rotation) -> Option<usize> {
        let offset = self.offset(direction).ok()?;
        let rotated = rotation.transform_offset([offset[0], offset[1]]);
        let target = [rotated[0], rotated[1], offset[2]];
        self.offsets().iter().position(|candidate| *candidate == target)
    }
}
