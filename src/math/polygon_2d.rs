use super::{Point2, EPSILON};

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Perimeter of a closed ring.
#[must_use]
pub fn perimeter_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| (points[(i + 1) % n] - points[i]).norm()).sum()
}

/// Point-in-polygon test by winding number.
///
/// Points exactly on the boundary may land on either side; callers that care
/// combine this with a boundary-distance check.
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    winding_number_2d(point.x, point.y, polygon) != 0
}

/// Winding number of point `(px, py)` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(px: f64, py: f64, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let (x0, y0) = (verts[i].x, verts[i].y);
        let (x1, y1) = (verts[(i + 1) % n].x, verts[(i + 1) % n].y);

        if y0 <= py {
            if y1 > py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) > 0.0 {
                winding += 1;
            }
        } else if y1 <= py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
#[must_use]
pub fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Axis-aligned bounds `(min, max)` of a point set, or `None` when empty.
#[must_use]
pub fn bounds_2d(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Removes consecutive duplicates (including the wrap-around pair) closer
/// than `tolerance`.
#[must_use]
pub fn dedup_ring(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    let tol = tolerance.max(EPSILON);
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_none_or(|last| (p - last).norm() > tol) {
            out.push(*p);
        }
    }
    while out.len() > 1 {
        let (first, last) = (out[0], out[out.len() - 1]);
        if (first - last).norm() > tol {
            break;
        }
        out.pop();
    }
    out
}
