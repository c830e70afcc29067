use crate::geometry::Contour;
use crate::math::distance_2d::{point_to_segment_dist, signed_line_dist};
use crate::math::intersect_2d::clip_to_half_plane;
use crate::math::{Point2, EPSILON};
use crate::operations::boolean::RegionKernel;

/// Point at distance `length` from `origin` along the ray through `through`.
///
/// Returns `None` when `through` coincides with `origin`.
#[must_use]
pub fn far_point(origin: &Point2, through: &Point2, length: f64) -> Option<Point2> {
    let dir = through - origin;
    let len = dir.norm();
    if len < EPSILON {
        return None;
    }
    Some(origin + dir * (length / len))
}

/// Triangle with apex `apex` spanning the rays through `a` and `b` out to
/// `length`. `None` when the cone has no area at `tolerance`, which happens
/// when the edge `a–b` is aligned with the line of sight.
#[must_use]
pub fn cone(apex: &Point2, a: &Point2, b: &Point2, length: f64, tolerance: f64) -> Option<Contour> {
    let fa = far_point(apex, a, length)?;
    let fb = far_point(apex, b, length)?;
    Contour::triangle(*apex, fa, fb).filter(|c| !c.is_degenerate(tolerance))
}

/// Part of the cone through edge `a–b` that lies behind the edge, seen from
/// `apex`: the cone clipped to the far side of the line through the edge.
#[must_use]
pub fn wedge_behind(apex: &Point2, a: &Point2, b: &Point2, length: f64, tolerance: f64) -> Option<Contour> {
    let cone = cone(apex, a, b, length, tolerance)?;
    let apex_left = signed_line_dist(apex, a, b) > 0.0;
    let clipped = clip_to_half_plane(cone.points(), a, b, !apex_left);
    Contour::from_ring(&clipped).filter(|c| !c.is_degenerate(tolerance))
}

/// Triangle between `apex` and the edge `a–b`, dropped when thinner than
/// `tolerance`.
#[must_use]
pub fn capped_triangle(apex: &Point2, a: &Point2, b: &Point2, tolerance: f64) -> Option<Contour> {
    Contour::triangle(*apex, *a, *b).filter(|c| !c.is_degenerate(tolerance))
}

/// Number of distinct genuine crossings between the probe `start → end` and
/// the boundary of `region`.
///
/// A reported event counts only when its two points (one on the probe, one
/// on the boundary) coincide within the kernel tolerance. Events at the same
/// location, such as a probe through a vertex, count once. Events at `start`
/// are not counted: the observer is not its own occluder.
pub fn genuine_crossings<K: RegionKernel>(kernel: &K, start: &Point2, end: &Point2, region: &Contour) -> usize {
    let tol = kernel.tolerance();
    let mut hits: Vec<Point2> = Vec::new();
    for (on_probe, on_boundary) in kernel.curve_intersections(start, end, region) {
        if (on_probe - on_boundary).norm() > tol || (on_probe - start).norm() <= tol {
            continue;
        }
        if hits.iter().all(|h| (h - on_probe).norm() > tol) {
            hits.push(on_probe);
        }
    }
    hits.len()
}

/// Whether `point` lies on the segment `a–b` within `tolerance`.
#[must_use]
pub fn is_on_segment(point: &Point2, a: &Point2, b: &Point2, tolerance: f64) -> bool {
    point_to_segment_dist(point, a, b) <= tolerance
}

/// Midpoint of the segment `a–b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::from((a.coords + b.coords) * 0.5)
}
