use crate::error::{InputError, Result};
use crate::math::distance_2d::point_to_ring_dist;
use crate::math::polygon_2d::{
    bounds_2d, dedup_ring, perimeter_2d, point_in_polygon_2d, signed_area_2d,
};
use crate::math::simplify_2d::simplify_ring;
use crate::math::{Point2, EPSILON};

/// A closed ring expressed in the coordinates of a working plane.
///
/// The closing segment from the last vertex back to the first is implicit.
/// Every boolean and visibility step runs on contours; [`super::Polygon`]
/// is the 3D value callers hand in and get back.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point2>,
}

impl Contour {
    /// Creates a contour, dropping repeated and closing duplicate vertices.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewVertices` if fewer than 3 distinct
    /// vertices remain.
    pub fn new(points: &[Point2]) -> Result<Self> {
        Self::from_ring(points)
            .ok_or_else(|| InputError::TooFewVertices(dedup_ring(points, EPSILON).len()).into())
    }

    /// Like [`Contour::new`] but for ring data coming out of geometric
    /// operations, where a collapsed ring is simply discarded.
    #[must_use]
    pub fn from_ring(points: &[Point2]) -> Option<Self> {
        let points = dedup_ring(points, EPSILON);
        (points.len() >= 3).then_some(Self { points })
    }

    /// Triangle with the given corners; `None` when two corners coincide.
    #[must_use]
    pub fn triangle(a: Point2, b: Point2, c: Point2) -> Option<Self> {
        Self::from_ring(&[a, b, c])
    }

    /// The ring's vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of vertices (and of edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no vertices. Every constructor keeps at least
    /// three, so this is `false` for any contour that exists; it pairs with
    /// [`Contour::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the edges `(start, end)`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed area, positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Total edge length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        perimeter_2d(&self.points)
    }

    /// Whether the region is thinner than `tolerance`: its area is no more
    /// than a band of that width along half its perimeter. Collinear
    /// triangles and slivers left by boolean operations fall under this.
    #[must_use]
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.area() <= 0.5 * tolerance * self.perimeter()
    }

    /// Whether the ring winds counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns the same ring wound counter-clockwise.
    #[must_use]
    pub fn to_ccw(&self) -> Self {
        if self.is_ccw() {
            return self.clone();
        }
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Whether `point` is inside the ring or within `tolerance` of its boundary.
    #[must_use]
    pub fn contains(&self, point: &Point2, tolerance: f64) -> bool {
        self.is_on_boundary(point, tolerance) || point_in_polygon_2d(point, &self.points)
    }

    /// Whether `point` is strictly inside, farther than `tolerance` from the boundary.
    #[must_use]
    pub fn contains_strictly(&self, point: &Point2, tolerance: f64) -> bool {
        !self.is_on_boundary(point, tolerance) && point_in_polygon_2d(point, &self.points)
    }

    /// Whether `point` lies within `tolerance` of the boundary.
    #[must_use]
    pub fn is_on_boundary(&self, point: &Point2, tolerance: f64) -> bool {
        self.distance_to_boundary(point) <= tolerance
    }

    /// Distance from `point` to the nearest edge.
    #[must_use]
    pub fn distance_to_boundary(&self, point: &Point2) -> f64 {
        point_to_ring_dist(point, &self.points)
    }

    /// Length of the bounding-box diagonal.
    #[must_use]
    pub fn bounding_diagonal(&self) -> f64 {
        bounds_2d(&self.points).map_or(0.0, |(min, max)| (max - min).norm())
    }

    /// Coarsened copy at tolerance `epsilon`; see [`simplify_ring`].
    #[must_use]
    pub fn simplified(&self, epsilon: f64) -> Self {
        Self::from_ring(&simplify_ring(&self.points, epsilon)).unwrap_or_else(|| self.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(size: f64) -> Contour {
        Contour::new(&[p(0.0, 0.0), p(size, 0.0), p(size, size), p(0.0, size)]).unwrap()
    }

    #[test]
    fn new_rejects_degenerate_rings() {
        assert!(Contour::new(&[p(0.0, 0.0), p(1.0, 0.0)]).is_err());
        assert!(Contour::new(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0)]).is_err());
    }

    #[test]
    fn new_drops_closing_duplicate() {
        let c = Contour::new(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)]).unwrap();
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
        assert_eq!(c.edges().count(), 3);
    }

    #[test]
    fn area_and_orientation() {
        let c = square(2.0);
        assert!((c.area() - 4.0).abs() < TOL);
        assert!(c.is_ccw());
        let cw = Contour::new(&[p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)]).unwrap();
        assert!(!cw.is_ccw());
        assert!(cw.to_ccw().is_ccw());
        assert!((cw.to_ccw().area() - 4.0).abs() < TOL);
    }

    #[test]
    fn containment_with_tolerance() {
        let c = square(2.0);
        assert!(c.contains(&p(1.0, 1.0), TOL));
        assert!(c.contains(&p(2.0, 1.0), TOL));
        assert!(!c.contains_strictly(&p(2.0, 1.0), TOL));
        assert!(!c.contains(&p(3.0, 1.0), TOL));
        assert!(c.is_on_boundary(&p(0.0, 1.0), TOL));
    }

    #[test]
    fn degenerate_detection() {
        let sliver = Contour::new(&[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 1e-4), p(0.0, 1e-4)]).unwrap();
        assert!(sliver.is_degenerate(1e-3));
        assert!(!sliver.is_degenerate(1e-6));
        let collinear = Contour::new(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)]).unwrap();
        assert!(collinear.is_degenerate(1e-9));
        assert!(!square(1.0).is_degenerate(1e-6));
    }

    #[test]
    fn bounding_diagonal_of_square() {
        assert!((square(10.0).bounding_diagonal() - 200.0_f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn simplified_keeps_a_ring() {
        let c = square(1.0);
        let s = c.simplified(100.0);
        assert!(s.len() >= 3);
    }
}
