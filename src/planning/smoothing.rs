//! Catmull-Rom path smoothing.
//!
//! Optional densification pass over a generated turn path. The smoothing
//! factor maps to 1–5 interpolation segments per original waypoint span;
//! endpoints are pinned, total length is recomputed from the new polyline,
//! and the input path is left untouched. Waypoint headings need no
//! separate bookkeeping: [`TurnPath::heading_at`] re-derives them from the
//! densified neighbors.

use crate::core::Position2D;
use crate::planning::path::TurnPath;

/// Catmull-Rom smoother with a fixed smoothing factor.
pub struct PathSmoother {
    factor: f32,
}

impl PathSmoother {
    /// Create a smoother. Factors at or below zero disable smoothing;
    /// factors above one are treated as one.
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }

    /// Interpolation segments inserted per original span.
    pub fn segments_per_span(&self) -> usize {
        1 + (self.factor.clamp(0.0, 1.0) * 4.0).round() as usize
    }

    /// Smooth a turn path.
    ///
    /// Returns a clone unchanged when smoothing is disabled or the path
    /// has fewer than four waypoints (Catmull-Rom needs two neighbors per
    /// span; shorter paths gain nothing).
    pub fn smooth(&self, path: &TurnPath) -> TurnPath {
        let pts = &path.waypoints;
        if self.factor <= 0.0 || pts.len() < 4 {
            return path.clone();
        }

        let segments = self.segments_per_span();
        let mut waypoints = Vec::with_capacity((pts.len() - 1) * segments + 1);

        for i in 0..pts.len() - 1 {
            // Endpoint spans duplicate the boundary point as their
            // missing neighbor
            let p0 = if i == 0 { pts[0] } else { pts[i - 1] };
            let p1 = pts[i];
            let p2 = pts[i + 1];
            let p3 = if i + 2 < pts.len() {
                pts[i + 2]
            } else {
                pts[pts.len() - 1]
            };

            for s in 0..segments {
                let t = s as f32 / segments as f32;
                waypoints.push(catmull_rom(p0, p1, p2, p3, t));
            }
        }
        waypoints.push(pts[pts.len() - 1]);

        let total_length = TurnPath::polyline_length(&waypoints);
        TurnPath {
            waypoints,
            total_length,
            // Geometry changed; any prior boundary validation is stale
            boundary_check: None,
            ..path.clone()
        }
    }
}

/// Uniform Catmull-Rom interpolation between `p1` and `p2` at `t` in [0, 1).
fn catmull_rom(p0: Position2D, p1: Position2D, p2: Position2D, p3: Position2D, t: f32) -> Position2D {
    let t2 = t * t;
    let t3 = t2 * t;

    let c0 = p1 * 2.0;
    let c1 = (p2 - p0) * t;
    let c2 = (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2;
    let c3 = ((p1 - p2) * 3.0 + p3 - p0) * t3;

    (c0 + c1 + c2 + c3) * 0.5
}
