//! Constraint hooks checked between propagation quiescence and selection
//!
//! A constraint sees the propagator twice: once after wave initialization
//! and once per step before the next cell is selected. Hooks may only
//! remove possibilities (ban or select); anything they ban propagates fully
//! before the next hook runs. Constraints carrying private mutable state
//! across checks must register undo callbacks through
//! [`crate::TilePropagator::record_undo`] so backtracking can restore it.

use crate::algorithm::executor::TilePropagator;
use crate::io::error::Result;

/// Border bans and forces
pub mod border;
/// Run-length limits along an axis
pub mod count;
/// Fixed tile placement
pub mod fixed;
/// Reflection symmetry
pub mod mirror;
/// Connected path constraints
pub mod path;

pub use border::{BorderConstraint, SideSet};
pub use count::MaxConsecutiveConstraint;
pub use fixed::FixedTileConstraint;
pub use mirror::MirrorConstraint;
pub use path::{EdgedPathConstraint, PathConstraint};

/// A user constraint participating in the solve
pub trait TileConstraint<V> {
    /// Called once after wave initialization
    ///
    /// # Errors
    ///
    /// Returns an error for invalid constraint configuration
    fn init(&mut self, propagator: &mut TilePropagator<V>) -> Result<()>;

    /// Called at every propagation quiescence, before the next selection
    ///
    /// # Errors
    ///
    /// Returns an error for invalid constraint configuration
    fn check(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let _ = propagator;
        Ok(())
    }
}
