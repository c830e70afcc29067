pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod simplify_2d;

/// 2D point type (coordinates in a working plane).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Absolute tolerance used when no configuration is supplied.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Threshold below which a direction or length is treated as zero,
/// independent of the model tolerance.
pub const EPSILON: f64 = 1e-12;
