use super::{Point2, EPSILON};

/// Returns the closest point to `p` on the segment `a`–`b`.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < EPSILON * EPSILON {
        // Degenerate segment (zero length).
        return *a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Returns the minimum distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_point_on_segment(p, a, b)).norm()
}

/// Returns the minimum distance from `p` to the boundary of a closed ring.
#[must_use]
pub fn point_to_ring_dist(p: &Point2, ring: &[Point2]) -> f64 {
    let n = ring.len();
    match n {
        0 => f64::INFINITY,
        1 => (p - ring[0]).norm(),
        _ => (0..n)
            .map(|i| point_to_segment_dist(p, &ring[i], &ring[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Signed distance of `p` from the infinite line through `a` and `b`.
///
/// Positive on the left of `a → b`. Returns `0.0` for a degenerate line.
#[must_use]
pub fn signed_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < EPSILON {
        return 0.0;
    }
    (d.x * (p.y - a.y) - d.y * (p.x - a.x)) / len
}
