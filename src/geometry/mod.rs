pub mod contour;
pub mod plane;
pub mod pline;
pub mod polygon;

pub use contour::Contour;
pub use plane::Plane;
pub use pline::{Pline, PlineVertex};
pub use polygon::Polygon;
