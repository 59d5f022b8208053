//! Turn path artifacts.
//!
//! A [`TurnPath`] is the fully materialized output of a turn generator: an
//! ordered waypoint list plus the metadata the execution layer and the
//! boundary safety layer need. Waypoints are materialized eagerly because
//! progress tracking needs random access to them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{Pose2D, Position2D};

/// Turn maneuver topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurnStyle {
    /// Single constant-curvature loop (Dubins or semicircular fallback)
    #[default]
    Omega,
    /// Three-point turn with one reverse segment
    K,
    /// Omega with an enlarged radius for extra clearance
    Wide,
    /// Pull-ahead/back/pull-out maneuver for narrow headlands
    T,
    /// Angled pull-ahead with a short reverse
    Y,
}

impl TurnStyle {
    /// All styles, in evaluation order.
    pub const ALL: [TurnStyle; 5] = [
        TurnStyle::Omega,
        TurnStyle::K,
        TurnStyle::Wide,
        TurnStyle::T,
        TurnStyle::Y,
    ];

    /// Whether this maneuver includes reverse segments.
    #[inline]
    pub fn requires_reverse(&self) -> bool {
        matches!(self, TurnStyle::K | TurnStyle::T | TurnStyle::Y)
    }

    /// Short name for logs and status messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnStyle::Omega => "omega",
            TurnStyle::K => "k-turn",
            TurnStyle::Wide => "wide",
            TurnStyle::T => "t-turn",
            TurnStyle::Y => "y-turn",
        }
    }
}

/// A single waypoint violating the boundary clearance.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryViolation {
    /// Index into the checked path's waypoint list
    pub index: usize,
    /// The violating waypoint
    pub point: Position2D,
    /// Its distance to the nearest boundary edge (meters)
    pub distance: f32,
}

/// Result of validating a path against boundary polygons.
#[derive(Clone, Debug)]
pub struct BoundaryCheck {
    /// True when every waypoint keeps the required clearance
    pub is_valid: bool,
    /// Smallest waypoint-to-boundary distance seen (meters)
    pub closest_distance: f32,
    /// Clearance the check was run with (meters)
    pub required_clearance: f32,
    /// Violating waypoints in path order, empty when valid
    pub violations: Vec<BoundaryViolation>,
}

impl BoundaryCheck {
    /// Index of the first violating waypoint, if any.
    pub fn first_violation(&self) -> Option<usize> {
        self.violations.first().map(|v| v.index)
    }

    /// Human-readable summary for operator-facing warnings.
    pub fn description(&self) -> String {
        if self.is_valid {
            format!(
                "path clear of boundary ({:.2}m closest, {:.2}m required)",
                self.closest_distance, self.required_clearance
            )
        } else {
            format!(
                "{} waypoint(s) within {:.2}m of boundary, closest {:.2}m at index {}",
                self.violations.len(),
                self.required_clearance,
                self.closest_distance,
                self.first_violation().unwrap_or(0)
            )
        }
    }
}

/// A generated turn connecting the end of one guidance track to the start
/// of the next.
///
/// Invariants: at least two waypoints, first at the entry pose, last at the
/// exit pose.
#[derive(Clone, Debug)]
pub struct TurnPath {
    /// Maneuver topology that produced this path
    pub style: TurnStyle,
    /// Where the vehicle enters the turn
    pub entry: Pose2D,
    /// Where the vehicle leaves the turn
    pub exit: Pose2D,
    /// Materialized waypoints from entry to exit
    pub waypoints: Vec<Position2D>,
    /// Total travel distance including reverse segments (meters)
    pub total_length: f32,
    /// Wall-clock time spent generating the path
    pub computation_time: Duration,
    /// Whether the maneuver includes reverse segments
    pub requires_reverse: bool,
    /// Boundary validation result, when the path has been checked
    pub boundary_check: Option<BoundaryCheck>,
}

impl TurnPath {
    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// True when the path has no waypoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Implicit travel heading at a waypoint.
    ///
    /// End waypoints use a single-sided difference to their only neighbor;
    /// interior waypoints use the symmetric difference across both
    /// neighbors, which is smoother under dense sampling. The index is
    /// clamped to the waypoint range. Falls back to the entry heading for
    /// degenerate paths.
    pub fn heading_at(&self, index: usize) -> f32 {
        let n = self.waypoints.len();
        if n < 2 {
            return self.entry.heading;
        }

        let i = index.min(n - 1);
        if i == 0 {
            self.waypoints[0].heading_to(&self.waypoints[1])
        } else if i == n - 1 {
            self.waypoints[n - 2].heading_to(&self.waypoints[n - 1])
        } else {
            self.waypoints[i - 1].heading_to(&self.waypoints[i + 1])
        }
    }

    /// Polyline length of the waypoint sequence.
    ///
    /// For forward-only styles this matches `total_length`; for reversing
    /// styles `total_length` is the analytic sum of segment lengths.
    pub fn polyline_length(waypoints: &[Position2D]) -> f32 {
        if waypoints.len() < 2 {
            return 0.0;
        }
        waypoints.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Remaining polyline length from a waypoint index to the exit.
    pub fn remaining_length(&self, from_index: usize) -> f32 {
        if from_index >= self.waypoints.len() {
            return 0.0;
        }
        Self::polyline_length(&self.waypoints[from_index..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn straight_path() -> TurnPath {
        let waypoints = vec![
            Position2D::new(0.0, 0.0),
            Position2D::new(1.0, 0.0),
            Position2D::new(2.0, 0.0),
            Position2D::new(3.0, 0.0),
        ];
        TurnPath {
            style: TurnStyle::Omega,
            entry: Pose2D::new(waypoints[0], 0.0),
            exit: Pose2D::new(waypoints[3], 0.0),
            total_length: 3.0,
            waypoints,
            computation_time: Duration::ZERO,
            requires_reverse: false,
            boundary_check: None,
        }
    }

    #[test]
    fn test_style_requires_reverse() {
        assert!(!TurnStyle::Omega.requires_reverse());
        assert!(!TurnStyle::Wide.requires_reverse());
        assert!(TurnStyle::K.requires_reverse());
        assert!(TurnStyle::T.requires_reverse());
        assert!(TurnStyle::Y.requires_reverse());
    }

    #[test]
    fn test_heading_at_straight() {
        let path = straight_path();
        for i in 0..path.len() {
            assert!((path.heading_at(i) - 0.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_heading_at_corner_uses_symmetric_difference() {
        let mut path = straight_path();
        path.waypoints = vec![
            Position2D::new(0.0, 0.0),
            Position2D::new(1.0, 0.0),
            Position2D::new(1.0, 1.0),
        ];
        // Interior heading spans (0,0) -> (1,1), i.e. 45 degrees
        assert!((path.heading_at(1) - FRAC_PI_2 / 2.0).abs() < 1e-6);
        // Last heading is single-sided: straight north
        assert!((path.heading_at(2) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_remaining_length() {
        let path = straight_path();
        assert!((path.remaining_length(0) - 3.0).abs() < 1e-6);
        assert!((path.remaining_length(2) - 1.0).abs() < 1e-6);
        assert!((path.remaining_length(4) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_boundary_check_description() {
        let check = BoundaryCheck {
            is_valid: false,
            closest_distance: 0.3,
            required_clearance: 0.5,
            violations: vec![BoundaryViolation {
                index: 7,
                point: Position2D::new(1.0, 2.0),
                distance: 0.3,
            }],
        };
        assert_eq!(check.first_violation(), Some(7));
        assert!(check.description().contains("index 7"));
    }
}
