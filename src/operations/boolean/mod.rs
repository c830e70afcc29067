mod difference;
mod overlay;
mod retry;

pub use difference::difference;
pub use overlay::OverlayKernel;
pub use retry::{retry_with_escalation, RetryOutcome};

use crate::geometry::Contour;
use crate::math::intersect_2d::segment_intersections_2d;
use crate::math::Point2;

/// How two closed regions sit relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRelation {
    /// No shared area (touching boundaries included).
    Disjoint,
    /// The first region lies inside the second.
    AInsideB,
    /// The second region lies inside the first.
    BInsideA,
    /// The regions overlap with crossing or touching boundaries.
    MutualIntersection,
}

/// Boolean region algebra over planar contours.
///
/// The visibility engine only talks to the geometry kernel through this
/// trait. All contours handed to and returned from a kernel live in the
/// same working plane. Results are outer boundaries. On degenerate input a
/// boolean operation may come back empty; [`retry_with_escalation`] re-runs
/// it at coarser tolerances.
pub trait RegionKernel {
    /// Absolute tolerance used by every predicate and operation.
    fn tolerance(&self) -> f64;

    /// The same kernel running at a different tolerance.
    #[must_use]
    fn with_tolerance(&self, tolerance: f64) -> Self
    where
        Self: Sized;

    /// Union of all `regions`. May return several disjoint contours, or
    /// none on degenerate input.
    fn union(&self, regions: &[Contour]) -> Vec<Contour>;

    /// Intersection of `a` and `b`.
    fn intersection(&self, a: &Contour, b: &Contour) -> Vec<Contour>;

    /// `a` minus `b`.
    fn difference_one(&self, a: &Contour, b: &Contour) -> Vec<Contour>;

    /// Unsigned area of `region`.
    fn area(&self, region: &Contour) -> f64 {
        region.area()
    }

    /// Raw intersection events between the segment `start → end` and the
    /// boundary of `region`, each as `(point_on_segment, point_on_boundary)`.
    fn curve_intersections(&self, start: &Point2, end: &Point2, region: &Contour) -> Vec<(Point2, Point2)> {
        region
            .edges()
            .flat_map(|(a, b)| segment_intersections_2d(start, end, &a, &b, self.tolerance()))
            .collect()
    }

    /// Coarsens `region` within a tolerance band.
    fn simplify(&self, region: &Contour, tolerance: f64) -> Contour {
        region.simplified(tolerance)
    }

    /// Classifies how `a` and `b` relate.
    fn relationship(&self, a: &Contour, b: &Contour) -> RegionRelation {
        let tol = self.tolerance();
        if boundaries_meet(a, b, tol) {
            let shared: f64 = self.intersection(a, b).iter().map(|c| self.area(c)).sum();
            let band = 0.5 * tol * a.perimeter().min(b.perimeter());
            if shared <= band {
                return RegionRelation::Disjoint;
            }
            return RegionRelation::MutualIntersection;
        }
        // Boundaries are apart: either nested or disjoint, decided by any vertex.
        if a.contains(&b.points()[0], tol) {
            RegionRelation::BInsideA
        } else if b.contains(&a.points()[0], tol) {
            RegionRelation::AInsideB
        } else {
            RegionRelation::Disjoint
        }
    }
}

/// Whether the boundaries of `a` and `b` cross or come within `tolerance`.
fn boundaries_meet(a: &Contour, b: &Contour, tolerance: f64) -> bool {
    a.edges().any(|(a0, a1)| {
        b.edges().any(|(b0, b1)| {
            segment_intersections_2d(&a0, &a1, &b0, &b1, tolerance)
                .iter()
                .any(|(pa, pb)| (pa - pb).norm() <= tolerance)
        })
    }) || b.points().iter().any(|p| a.is_on_boundary(p, tolerance))
        || a.points().iter().any(|p| b.is_on_boundary(p, tolerance))
}
