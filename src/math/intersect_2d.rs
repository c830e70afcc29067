use super::distance_2d::signed_line_dist;
use super::{Point2, Vector2, EPSILON};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < EPSILON * d1.norm() * d2.norm() {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Intersection events between segments `a0–a1` and `b0–b1`.
///
/// Each event is a pair `(point_on_a, point_on_b)`, each computed on its own
/// segment from its own clamped parameter. The parameter windows are widened
/// by `tolerance`, so near misses are reported too; a caller that only wants
/// genuine crossings keeps the events whose two points coincide.
///
/// Collinear overlapping segments report the two ends of the overlap.
#[must_use]
pub fn segment_intersections_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> Vec<(Point2, Point2)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let len_a = da.norm();
    let len_b = db.norm();
    if len_a < EPSILON || len_b < EPSILON {
        return Vec::new();
    }

    match line_line_intersect_2d(a0, &da, b0, &db) {
        Some((t, u)) => {
            let eps_t = tolerance / len_a;
            let eps_u = tolerance / len_b;
            if t < -eps_t || t > 1.0 + eps_t || u < -eps_u || u > 1.0 + eps_u {
                return Vec::new();
            }
            let pa = a0 + da * t.clamp(0.0, 1.0);
            let pb = b0 + db * u.clamp(0.0, 1.0);
            vec![(pa, pb)]
        }
        None => collinear_overlap(a0, &da, b0, b1, tolerance),
    }
}

/// Overlap of two parallel segments, as intersection events on `a`.
fn collinear_overlap(
    a0: &Point2,
    da: &Vector2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> Vec<(Point2, Point2)> {
    let a1 = a0 + da;
    if signed_line_dist(b0, a0, &a1).abs() > tolerance
        || signed_line_dist(b1, a0, &a1).abs() > tolerance
    {
        return Vec::new();
    }

    let len_sq = da.norm_squared();
    let tb0 = (b0 - a0).dot(da) / len_sq;
    let tb1 = (b1 - a0).dot(da) / len_sq;
    let lo = tb0.min(tb1).max(0.0);
    let hi = tb0.max(tb1).min(1.0);
    let eps = tolerance / len_sq.sqrt();
    if hi < lo - eps {
        return Vec::new();
    }

    let start = a0 + da * lo.min(hi);
    let end = a0 + da * hi.max(lo);
    if (end - start).norm() <= tolerance {
        vec![(start, start)]
    } else {
        vec![(start, start), (end, end)]
    }
}

/// Clips a polygon to one side of the infinite line through `a` and `b`.
///
/// Keeps the part on the left of `a → b` when `keep_left`, otherwise the
/// right part. Single-edge Sutherland-Hodgman pass; the result may be empty.
#[must_use]
pub fn clip_to_half_plane(polygon: &[Point2], a: &Point2, b: &Point2, keep_left: bool) -> Vec<Point2> {
    let sign = if keep_left { 1.0 } else { -1.0 };
    let side = |p: &Point2| sign * signed_line_dist(p, a, b);

    let n = polygon.len();
    let mut output = Vec::with_capacity(n + 2);
    for i in 0..n {
        let current = polygon[i];
        let next = polygon[(i + 1) % n];
        let sc = side(&current);
        let sn = side(&next);

        if sc >= 0.0 {
            output.push(current);
        }
        // Edge crosses the line strictly: emit the crossing point.
        if (sc > 0.0 && sn < 0.0) || (sc < 0.0 && sn > 0.0) {
            let t = sc / (sc - sn);
            output.push(current + (next - current) * t);
        }
    }
    output
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area_2d;

    const TOL: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let (t, u) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.5, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 0.5).abs() < TOL);
        assert!((u - 1.0).abs() < TOL);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        assert!(line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.0, 1.0),
            &Vector2::new(2.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn crossing_segments_report_coincident_points() {
        let hits = segment_intersections_2d(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0), TOL);
        assert_eq!(hits.len(), 1);
        let (a, b) = hits[0];
        assert!((a - p(1.0, 1.0)).norm() < TOL);
        assert!((a - b).norm() < TOL);
    }

    #[test]
    fn disjoint_segments_report_nothing() {
        let hits = segment_intersections_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0), TOL);
        assert!(hits.is_empty());
    }

    #[test]
    fn near_miss_points_do_not_coincide() {
        // b stops just short of a, inside the widened window.
        let tol = 0.1;
        let hits = segment_intersections_2d(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.05), &p(1.0, 1.0), tol);
        assert_eq!(hits.len(), 1);
        let (a, b) = hits[0];
        assert!((a - b).norm() > 1e-3);
    }

    #[test]
    fn collinear_overlap_reports_both_ends() {
        let hits = segment_intersections_2d(&p(0.0, 0.0), &p(4.0, 0.0), &p(1.0, 0.0), &p(6.0, 0.0), TOL);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].0 - p(1.0, 0.0)).norm() < TOL);
        assert!((hits[1].0 - p(4.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn parallel_offset_segments_do_not_overlap() {
        let hits = segment_intersections_2d(&p(0.0, 0.0), &p(4.0, 0.0), &p(0.0, 1.0), &p(4.0, 1.0), TOL);
        assert!(hits.is_empty());
    }

    #[test]
    fn half_plane_clip_splits_triangle() {
        let tri = vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0)];
        // Line x = 1 going up; left side is x < 1.
        let left = clip_to_half_plane(&tri, &p(1.0, 0.0), &p(1.0, 1.0), true);
        let right = clip_to_half_plane(&tri, &p(1.0, 0.0), &p(1.0, 1.0), false);
        let total = signed_area_2d(&tri).abs();
        let sum = signed_area_2d(&left).abs() + signed_area_2d(&right).abs();
        assert!((sum - total).abs() < TOL);
        assert!((signed_area_2d(&right).abs() - 4.5).abs() < TOL);
    }

    #[test]
    fn half_plane_clip_all_outside() {
        let tri = vec![p(2.0, 0.0), p(4.0, 0.0), p(3.0, 1.0)];
        let left = clip_to_half_plane(&tri, &p(1.0, 0.0), &p(1.0, 1.0), true);
        assert!(left.is_empty());
    }
}
