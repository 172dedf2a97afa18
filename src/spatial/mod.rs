//! Spatial data structures: direction sets and grid topology

/// Direction sets and coordinate axes
pub mod directions;
/// Grid topology and neighbor tables
pub mod topology;

pub use directions::{Axis, DirectionSet};
pub use topology::{GridTopology, NeighborTable};
