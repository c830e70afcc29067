use crate::math::arc_2d::{BulgeArc, STRAIGHT_BULGE};
use crate::math::{Point2, Point3};

/// Bulge-encoded polyline vertex for mixed line/arc segments.
///
/// `bulge = tan(sweep_angle / 4)`:
/// - `0` = straight line to next vertex
/// - `> 0` = counter-clockwise arc to next vertex
/// - `< 0` = clockwise arc to next vertex
/// - `|bulge| = 1` = semicircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PlineVertex {
    /// Creates a new vertex with the given coordinates and bulge.
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    /// Creates a line vertex (bulge = 0).
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }

    fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// A polyline on the XY plane with mixed straight-line and circular-arc
/// segments.
///
/// Each segment between consecutive vertices is either a line (bulge=0)
/// or a circular arc (bulge≠0). For closed polylines, the last vertex
/// connects back to the first.
#[derive(Debug, Clone)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl Pline {
    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Indices of the segments that are arcs rather than straight lines.
    #[must_use]
    pub fn curved_segment_indices(&self) -> Vec<usize> {
        (0..self.segment_count())
            .filter(|&i| self.vertices[i].bulge.abs() >= STRAIGHT_BULGE)
            .collect()
    }

    /// Number of arc segments. A visibility query on a boundary with arcs is
    /// only as accurate as its tessellation.
    #[must_use]
    pub fn curved_segment_count(&self) -> usize {
        self.curved_segment_indices().len()
    }

    /// Flattens the polyline, splitting every arc into `divisions` equal
    /// chords and keeping straight segments as they are.
    ///
    /// The returned points do not repeat the first vertex for closed
    /// polylines. `divisions` of 0 is treated as 1.
    #[must_use]
    pub fn to_points(&self, divisions: u32) -> Vec<Point3> {
        let n = self.vertices.len();
        if n == 0 {
            return Vec::new();
        }
        let divisions = divisions.max(1);
        let seg_count = self.segment_count();
        let mut points = Vec::with_capacity(n + seg_count * divisions as usize);
        points.push(Point3::new(self.vertices[0].x, self.vertices[0].y, 0.0));

        for i in 0..seg_count {
            let v0 = &self.vertices[i];
            let v1 = &self.vertices[(i + 1) % n];

            if let Some(arc) = BulgeArc::from_bulge(&v0.point(), &v1.point(), v0.bulge) {
                for j in 1..divisions {
                    let t = f64::from(j) / f64::from(divisions);
                    let p = arc.point_at(t);
                    points.push(Point3::new(p.x, p.y, 0.0));
                }
            }
            points.push(Point3::new(v1.x, v1.y, 0.0));
        }

        if self.closed {
            // The closing segment ends back at the first vertex.
            points.pop();
        }
        points
    }
}
