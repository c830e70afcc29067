use crate::error::{InputError, Result};
use crate::math::{Point3, EPSILON};

use super::{Contour, Plane};

/// A closed planar polyline in 3D.
///
/// The closing segment from the last vertex back to the first is implicit,
/// so a polygon is always closed. Values are immutable: every operation
/// builds new polygons rather than editing its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// Consecutive duplicates and a repeated closing vertex are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewVertices` if fewer than 3 distinct
    /// vertices remain.
    pub fn new(vertices: Vec<Point3>) -> Result<Self> {
        let mut cleaned: Vec<Point3> = Vec::with_capacity(vertices.len());
        for v in vertices {
            if cleaned.last().is_none_or(|last| (v - last).norm() > EPSILON) {
                cleaned.push(v);
            }
        }
        while cleaned.len() > 1 && (cleaned[0] - cleaned[cleaned.len() - 1]).norm() <= EPSILON {
            cleaned.pop();
        }
        if cleaned.len() < 3 {
            return Err(InputError::TooFewVertices(cleaned.len()).into());
        }
        Ok(Self { vertices: cleaned })
    }

    /// Convenience constructor for a polygon on the world XY plane.
    ///
    /// # Errors
    ///
    /// Same as [`Polygon::new`].
    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect())
    }

    /// Lifts a plane-space contour back into 3D.
    #[must_use]
    pub fn from_contour(contour: &Contour, plane: &Plane) -> Self {
        Self {
            vertices: contour.points().iter().map(|uv| plane.lift(uv)).collect(),
        }
    }

    /// The polygon's vertices, without the implicit closing repeat.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// The first vertex.
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        self.vertices[0]
    }

    /// Plane the polygon lies in (Newell fit, see [`Plane::fit`]).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the vertices are collinear.
    pub fn plane(&self) -> Result<Plane> {
        Plane::fit(&self.vertices)
    }

    /// Whether every vertex lies within `tolerance` of the fitted plane.
    #[must_use]
    pub fn is_planar(&self, tolerance: f64) -> bool {
        self.plane()
            .is_ok_and(|plane| self.vertices.iter().all(|v| plane.contains_point(v, tolerance)))
    }

    /// Projects the polygon into `plane` coordinates.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewVertices` if the projection collapses.
    pub fn to_contour(&self, plane: &Plane) -> Result<Contour> {
        let uv: Vec<_> = self.vertices.iter().map(|v| plane.project(v)).collect();
        Contour::new(&uv)
    }

    /// Unsigned area of the polygon.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.plane()
            .ok()
            .and_then(|plane| self.to_contour(&plane).ok())
            .map_or(0.0, |c| c.area())
    }
}
