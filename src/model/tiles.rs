//! Tile values and the rotated-tile sum type

use crate::model::rotation::Rotation;
use std::fmt;
use std::hash::Hash;

/// Contract for user-supplied tile payloads
///
/// Anything clonable, equatable, and hashable works as a tile value; the
/// solver never looks inside. The `Debug` bound exists so that errors can
/// name the offending tile.
pub trait TileValue: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> TileValue for T {}

/// A tile as seen by the solver
///
/// Either a plain user value or a synthetic rotated variant generated when a
/// rotation has no explicit transform and the treatment is `Generated`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tile<V> {
    /// A user-supplied tile value
    Atom(V),
    /// A base value carrying a pending rotation
    Rotated {
        /// The base tile value
        value: V,
        /// The rotation applied to it
        rotation: Rotation,
    },
}

impl<V: TileValue> Tile<V> {
    /// Wrap a user value as a tile
    pub const fn atom(value: V) -> Self {
        Self::Atom(value)
    }

    /// The underlying user value, ignoring any rotation
    pub const fn value(&self) -> &V {
        match self {
            Self::Atom(value) | Self::Rotated { value, .. } => value,
        }
    }

    /// The rotation carried by a rotated tile, identity otherwise
    pub const fn rotation(&self) -> Rotation {
        match self {
            Self::Atom(_) => Rotation::identity(),
            Self::Rotated { rotation, .. } => *rotation,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Tile<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(value) => write!(f, "{value}"),
            Self::Rotated { value, rotation } => write!(f, "{value}!{rotation}"),
        }
    }
}
