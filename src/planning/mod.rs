//! Turn path planning: pattern generators, boundary safety, smoothing and
//! track selection.
//!
//! Everything in this layer is pure and lock-free; candidate turns may be
//! generated concurrently off the execution thread.

pub mod boundary;
pub mod generators;
pub mod path;
pub mod provider;
pub mod smoothing;
pub mod tracks;

pub use boundary::{check_boundaries, check_boundary, BOUNDARY_SEARCH_ITERATIONS};
pub use generators::TurnGenerator;
pub use path::{BoundaryCheck, BoundaryViolation, TurnPath, TurnStyle};
pub use provider::{BoundaryAwarePathProvider, DubinsPathProvider, GuidedPathResult, RawPath};
pub use smoothing::PathSmoother;
pub use tracks::{find_next_track, next_track_for, RowSkipMode};
