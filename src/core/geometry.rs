//! Distance queries against segments and boundary polygons.

use super::point::Position2D;

/// Distance from a point to a line segment.
///
/// Projects the point onto the segment and clamps to the endpoints, so the
/// result is the true minimum distance rather than the perpendicular
/// distance to the infinite line.
pub fn point_to_segment_distance(point: &Position2D, a: &Position2D, b: &Position2D) -> f32 {
    let ab = *b - *a;
    let len_sq = ab.dot(&ab);

    if len_sq < 1e-10 {
        // Segment is essentially a point
        return point.distance(a);
    }

    let ap = *point - *a;
    let t = (ap.dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = *a + ab * t;
    point.distance(&closest)
}

/// Minimum distance from a point to a polygon's boundary.
///
/// The polygon is implicitly closed (an edge runs from the last vertex back
/// to the first). Returns the distance to the nearest edge regardless of
/// whether the point lies inside or outside. An empty polygon yields
/// `f32::INFINITY`; a single vertex yields the distance to that vertex.
pub fn distance_to_polygon(point: &Position2D, polygon: &[Position2D]) -> f32 {
    match polygon.len() {
        0 => f32::INFINITY,
        1 => point.distance(&polygon[0]),
        n => {
            let mut min_dist = f32::INFINITY;
            for i in 0..n {
                let a = &polygon[i];
                let b = &polygon[(i + 1) % n];
                let d = point_to_segment_distance(point, a, b);
                if d < min_dist {
                    min_dist = d;
                }
            }
            min_dist
        }
    }
}
