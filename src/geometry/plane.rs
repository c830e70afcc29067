use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, EPSILON};

/// An infinite plane in 3D space with an orthonormal in-plane frame.
///
/// Defined by an origin point and two orthogonal unit directions
/// (`u_dir`, `v_dir`). The normal is `u_dir × v_dir`.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Fits a plane to a closed ring of points.
    ///
    /// The normal is Newell's estimate (the sum of edge cross products over
    /// every vertex). The origin is the first point and `u_dir` points toward the
    /// first vertex that is not coincident with it, so the frame follows
    /// the ring's own start and winding: the ring projects counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the points are collinear or
    /// fewer than three.
    pub fn fit(points: &[Point3]) -> Result<Self> {
        let n = points.len();
        if n < 3 {
            return Err(GeometryError::Degenerate(format!("cannot fit a plane to {n} points")).into());
        }

        let mut normal = Vector3::zeros();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        let scale = points
            .iter()
            .map(|p| (p - points[0]).norm())
            .fold(0.0_f64, f64::max);
        if normal.norm() < EPSILON * scale.max(1.0).powi(2) {
            return Err(GeometryError::Degenerate("points are collinear".into()).into());
        }
        let normal = normal.normalize();

        let origin = points[0];
        let toward = points
            .iter()
            .skip(1)
            .map(|p| p - origin)
            .find(|d| d.norm() > EPSILON * scale.max(1.0))
            .ok_or_else(|| GeometryError::Degenerate("points are coincident".into()))?;
        // Remove any out-of-plane component before normalising.
        let u_dir = (toward - normal * toward.dot(&normal)).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the normal vector of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance of `point` from the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Whether `point` lies within `tolerance` of the plane.
    #[must_use]
    pub fn contains_point(&self, point: &Point3, tolerance: f64) -> bool {
        self.signed_distance(point).abs() <= tolerance
    }

    /// Projects a 3D point into the plane's `(u, v)` coordinates.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let diff = point - self.origin;
        Point2::new(diff.dot(&self.u_dir), diff.dot(&self.v_dir))
    }

    /// Maps plane coordinates back to a 3D point on the plane.
    #[must_use]
    pub fn lift(&self, uv: &Point2) -> Point3 {
        self.origin + self.u_dir * uv.x + self.v_dir * uv.y
    }
}
