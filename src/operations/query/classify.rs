use tracing::debug;

use crate::config::IsovistConfig;
use crate::error::{InputError, Result};
use crate::geometry::{Plane, Polygon};
use crate::operations::boolean::{OverlayKernel, RegionKernel, RegionRelation};

/// A classified set of regions: one master boundary and the voids inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSet {
    /// The outer boundary, the polygon with the largest area.
    pub master: Polygon,
    /// Polygons strictly inside the master, in input order.
    pub voids: Vec<Polygon>,
    /// Working plane of the master.
    pub plane: Plane,
}

/// Partitions an unordered set of coplanar closed polygons into a master
/// region and the voids it contains.
///
/// The polygon with the largest area becomes the master; ties go to the
/// polygon that comes first. Polygons that are disjoint from the master,
/// overlap it, or contain it are dropped.
pub struct ClassifyRegions<'a> {
    curves: &'a [Polygon],
    config: IsovistConfig,
}

impl<'a> ClassifyRegions<'a> {
    /// Creates a classifier over `curves` with the default configuration.
    #[must_use]
    pub fn new(curves: &'a [Polygon]) -> Self {
        Self {
            curves,
            config: IsovistConfig::default(),
        }
    }

    /// Sets the configuration (only the tolerance is used).
    #[must_use]
    pub fn with_config(mut self, config: IsovistConfig) -> Self {
        self.config = config;
        self
    }

    /// Classifies the polygons.
    ///
    /// # Errors
    ///
    /// Returns `InputError::EmptyInput` for no polygons,
    /// `InputError::NotCoplanar` when a polygon is warped or lies off the
    /// plane of the first one, and `GeometryError::Degenerate` when the
    /// master has no well-defined plane.
    pub fn execute(&self) -> Result<RegionSet> {
        self.config.validate()?;
        let tol = self.config.tolerance;
        let first = self.curves.first().ok_or(InputError::EmptyInput)?;

        let reference = first.plane()?;
        for curve in self.curves {
            if !curve.is_planar(tol) || !reference.contains_point(&curve.start_point(), tol) {
                return Err(InputError::NotCoplanar.into());
            }
        }

        let mut master_idx = 0;
        let mut master_area = first.area();
        for (i, curve) in self.curves.iter().enumerate().skip(1) {
            let area = curve.area();
            if area > master_area {
                master_idx = i;
                master_area = area;
            }
        }

        let master = self.curves[master_idx].clone();
        let plane = master.plane()?;
        let master_contour = master.to_contour(&plane)?;
        let kernel = OverlayKernel::new(tol);

        let mut voids = Vec::new();
        for (i, curve) in self.curves.iter().enumerate() {
            if i == master_idx {
                continue;
            }
            let contour = curve.to_contour(&plane)?;
            match kernel.relationship(&master_contour, &contour) {
                RegionRelation::BInsideA => voids.push(curve.clone()),
                relation => debug!(index = i, ?relation, "dropping polygon that is not a void"),
            }
        }

        debug!(master = master_idx, voids = voids.len(), area = master_area, "regions classified");
        Ok(RegionSet { master, voids, plane })
    }
}
