//! External path-provider collaborator interfaces.
//!
//! Raw constant-curvature path synthesis (Dubins curves) and the iterative
//! boundary-guided variant live outside this crate; the engine consumes
//! them through these traits. The generators degrade gracefully when a
//! provider reports an unreachable pose combination, so implementations
//! are free to return `None`/unsucceeded rather than approximate.

use std::time::Duration;

use crate::core::{Pose2D, Position2D};

/// A raw path as returned by a provider: waypoints plus the provider's own
/// length accounting.
#[derive(Clone, Debug)]
pub struct RawPath {
    /// Waypoints from start to end pose
    pub waypoints: Vec<Position2D>,
    /// Path length in meters
    pub total_length: f32,
}

/// Minimal-length constant-curvature path synthesis between two oriented
/// points under a turning-radius constraint.
pub trait DubinsPathProvider: Send + Sync {
    /// Generate a path from `start` to `end` with the given turning radius,
    /// sampled roughly every `spacing` meters.
    ///
    /// Returns `None` when no path exists for the pose combination.
    fn generate_path(&self, start: Pose2D, end: Pose2D, radius: f32, spacing: f32)
        -> Option<RawPath>;
}

/// Result of a boundary-guided path search.
#[derive(Clone, Debug)]
pub struct GuidedPathResult {
    /// Whether the search converged on a candidate path
    pub succeeded: bool,
    /// The candidate path, present when `succeeded`
    pub path: Option<RawPath>,
    /// Smallest boundary clearance along the candidate (meters)
    pub min_boundary_distance: f32,
    /// Time the provider spent searching
    pub computation_time: Duration,
}

impl GuidedPathResult {
    /// A failed search with no candidate.
    pub fn failed() -> Self {
        Self {
            succeeded: false,
            path: None,
            min_boundary_distance: 0.0,
            computation_time: Duration::ZERO,
        }
    }
}

/// Iterative boundary-aware path synthesis: nudges a constant-curvature
/// path until it clears the given polygons by `min_distance`, within a
/// bounded iteration budget.
pub trait BoundaryAwarePathProvider: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn generate_boundary_aware_path(
        &self,
        start: Pose2D,
        end: Pose2D,
        radius: f32,
        boundaries: &[Vec<Position2D>],
        min_distance: f32,
        spacing: f32,
        max_iterations: usize,
    ) -> GuidedPathResult;
}
