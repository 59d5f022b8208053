//! Error types for the guidance turn engine.
//!
//! Configuration mistakes are hard errors rejected at the call that
//! introduced them; expected negative outcomes (no boundary-safe path, no
//! next track) are `Option`/`None` results, not errors.

use thiserror::Error;

/// Turn engine error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurnError {
    #[error("turning radius {0} must be greater than zero")]
    InvalidTurningRadius(f32),

    #[error("waypoint spacing {0} must be greater than zero")]
    InvalidWaypointSpacing(f32),

    #[error("smoothing factor {0} must be within [0, 1]")]
    InvalidSmoothingFactor(f32),

    #[error("wide radius multiplier {0} must be greater than one")]
    InvalidWideRadiusMultiplier(f32),

    #[error("track index {index} is out of range for {total} tracks")]
    TrackIndexOutOfRange { index: usize, total: usize },

    #[error("track count must be greater than zero")]
    NoTracks,

    #[error("a turn is already in progress")]
    TurnInProgress,

    #[error("turn path must contain at least two waypoints")]
    DegeneratePath,
}

pub type Result<T> = std::result::Result<T, TurnError>;
