mod classify;

pub use classify::{ClassifyRegions, RegionSet};
