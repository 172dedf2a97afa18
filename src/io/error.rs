//! Error types for model construction and solver operations

use std::fmt;

/// Main error type for all solver operations
///
/// Every variant is a configuration or usage error detected before or while
/// mutating the wave. A contradicted wave is not an error; it surfaces as a
/// solver status so that backtracking and retries can react to it.
#[derive(Debug)]
pub enum SolverError {
    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A tile was referenced that the model never registered
    UnknownTile {
        /// Debug rendering of the offending tile
        tile: String,
    },

    /// Direction index exceeds the topology's direction set
    UnknownDirection {
        /// The invalid direction index
        direction: usize,
        /// Number of directions in the set
        count: usize,
    },

    /// A tile transform was required but the rotation treatment forbids synthesizing one
    MissingTransform {
        /// Debug rendering of the tile that failed to transform
        tile: String,
        /// The rotation that was requested
        rotation: String,
    },

    /// Conflicting tile rotation declarations
    ConflictingTransform {
        /// Debug rendering of the source tile
        tile: String,
        /// The rotation declared twice with different images
        rotation: String,
    },

    /// Model compilation produced no patterns, so no cell can ever be decided
    EmptyPatternSet {
        /// Description of the model that compiled empty
        model: &'static str,
    },

    /// Model and topology disagree on dimensionality or direction set
    TopologyMismatch {
        /// What the model requires
        expected: String,
        /// What the topology provides
        actual: String,
    },

    /// Coordinates fall outside the topology
    OutOfBounds {
        /// The offending coordinates
        point: [usize; 3],
        /// Topology dimensions
        dimensions: [usize; 3],
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnknownTile { tile } => {
                write!(f, "Tile {tile} is not part of the model")
            }
            Self::UnknownDirection { direction, count } => {
                write!(
                    f,
                    "Direction index {direction} is out of bounds (direction set has {count})"
                )
            }
            Self::MissingTransform { tile, rotation } => {
                write!(f, "Tile {tile} has no transform under rotation {rotation}")
            }
            Self::ConflictingTransform { tile, rotation } => {
                write!(
                    f,
                    "Tile {tile} has conflicting transforms declared under rotation {rotation}"
                )
            }
            Self::EmptyPatternSet { model } => {
                write!(f, "{model} model compiled to an empty pattern set")
            }
            Self::TopologyMismatch { expected, actual } => {
                write!(f, "Topology mismatch: model requires {expected}, got {actual}")
            }
            Self::OutOfBounds { point, dimensions } => {
                write!(
                    f,
                    "Point ({}, {}, {}) is outside the {}x{}x{} topology",
                    point[0], point[1], point[2], dimensions[0], dimensions[1], dimensions[2]
                )
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an unknown tile error from any debug-renderable tile
pub fn unknown_tile(tile: &impl fmt::Debug) -> SolverError {
    SolverError::UnknownTile {
        tile: format!("{tile:?}"),
    }
}

/// Create a missing transform error
pub fn missing_transform(tile: &impl fmt::Debug, rotation: &impl fmt::Debug) -> SolverError {
    SolverError::MissingTransform {
        tile: format!("{tile:?}"),
        rotation: format!("{rotation:?}"),
    }
}
