use tracing::debug;

use crate::error::{InputError, Result};
use crate::geometry::{Pline, Polygon};

/// Replaces the arc segments of a closed bulge polyline with straight
/// chords, producing a polygon the visibility engine can consume.
///
/// Straight segments are kept as they are; each arc is split into
/// `divisions` chords of equal sweep. The result lies on the XY plane.
pub struct TessellateRegion<'a> {
    pline: &'a Pline,
    divisions: u32,
}

impl<'a> TessellateRegion<'a> {
    /// Creates a new tessellation operation.
    #[must_use]
    pub fn new(pline: &'a Pline, divisions: u32) -> Self {
        Self { pline, divisions }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns `InputError::OpenPolyline` if the polyline is not closed,
    /// `InputError::InvalidParameter` if `divisions` is zero, and
    /// `InputError::TooFewVertices` if fewer than 3 distinct points remain.
    pub fn execute(&self) -> Result<Polygon> {
        if !self.pline.closed {
            return Err(InputError::OpenPolyline.into());
        }
        if self.divisions == 0 {
            return Err(InputError::InvalidParameter {
                name: "divisions",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        let curved = self.pline.curved_segment_count();
        if curved > 0 {
            debug!(curved, divisions = self.divisions, "tessellating arc segments");
        }
        Polygon::new(self.pline.to_points(self.divisions))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::PlineVertex;
    use crate::math::Point3;
    use std::f64::consts::PI;

    fn stadium() -> Pline {
        // Rectangle 4 x 2 with semicircular caps on the short sides.
        Pline {
            vertices: vec![
                PlineVertex::line(0.0, 0.0),
                PlineVertex::new(4.0, 0.0, 1.0),
                PlineVertex::line(4.0, 2.0),
                PlineVertex::new(0.0, 2.0, 1.0),
            ],
            closed: true,
        }
    }

    #[test]
    fn straight_polyline_keeps_its_vertices() {
        let pline = Pline {
            vertices: vec![PlineVertex::line(0.0, 0.0), PlineVertex::line(3.0, 0.0), PlineVertex::line(3.0, 3.0)],
            closed: true,
        };
        let poly = TessellateRegion::new(&pline, 8).execute().unwrap();
        let expected = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 3.0, 0.0),
        ];
        assert_eq!(poly.vertices(), &expected);
    }

    #[test]
    fn arcs_are_split_into_chords() {
        let pline = stadium();
        assert_eq!(pline.curved_segment_indices(), vec![1, 3]);
        let poly = TessellateRegion::new(&pline, 16).execute().unwrap();
        // 4 original vertices plus 15 interior points per arc.
        assert_eq!(poly.vertices().len(), 4 + 2 * 15);
        let exact = 4.0 * 2.0 + PI;
        assert!(poly.area() < exact);
        assert!(poly.area() > exact - 0.05);
    }

    #[test]
    fn more_divisions_approach_the_arc() {
        let coarse = TessellateRegion::new(&stadium(), 4).execute().unwrap().area();
        let fine = TessellateRegion::new(&stadium(), 64).execute().unwrap().area();
        assert!(fine > coarse);
    }

    #[test]
    fn open_polyline_is_rejected() {
        let mut pline = stadium();
        pline.closed = false;
        assert!(TessellateRegion::new(&pline, 8).execute().is_err());
    }

    #[test]
    fn zero_divisions_is_rejected() {
        assert!(TessellateRegion::new(&stadium(), 0).execute().is_err());
    }

    #[test]
    fn collapsed_polyline_is_rejected() {
        let pline = Pline {
            vertices: vec![PlineVertex::line(0.0, 0.0), PlineVertex::line(1.0, 0.0)],
            closed: true,
        };
        assert!(TessellateRegion::new(&pline, 8).execute().is_err());
    }
}
