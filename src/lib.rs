pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use config::{IsovistConfig, RetryPolicy};
pub use error::{IsovistError, Result};
pub use geometry::{Plane, Polygon};
pub use operations::boolean::{OverlayKernel, RegionKernel, RegionRelation};
pub use operations::query::{ClassifyRegions, RegionSet};
pub use operations::visibility::{compute_isovist, Isovist, IsovistOutcome};
pub use tessellation::TessellateRegion;
