mod combine;
pub mod primitives;
mod self_occlusion;
mod void_occlusion;

use tracing::{debug, info, warn};

use crate::config::IsovistConfig;
use crate::error::{InputError, Result};
use crate::geometry::{Contour, Plane, Polygon};
use crate::math::Point3;
use crate::operations::boolean::{OverlayKernel, RegionKernel};
use crate::operations::query::ClassifyRegions;

use combine::{combine, Combined};
use self_occlusion::self_visible;
use void_occlusion::void_visible;

/// Result of an isovist query.
#[derive(Debug, Clone, PartialEq)]
pub enum IsovistOutcome {
    /// The visible part of the master region, as disjoint polygons.
    Visible(Vec<Polygon>),
    /// The final intersection stayed empty through every retry, so the
    /// visible area could not be determined.
    Indeterminate { attempts: usize },
}

impl IsovistOutcome {
    /// The visible polygons, if the query converged.
    #[must_use]
    pub fn polygons(&self) -> Option<&[Polygon]> {
        match self {
            Self::Visible(polygons) => Some(polygons),
            Self::Indeterminate { .. } => None,
        }
    }

    /// Total visible area; `None` for an indeterminate outcome.
    #[must_use]
    pub fn area(&self) -> Option<f64> {
        self.polygons().map(|ps| ps.iter().map(Polygon::area).sum())
    }
}

/// Computes the region of a master polygon visible from an observer.
///
/// Runs in two phases. The first removes what the master's own concave
/// corners hide. The second removes what each void shadows, then adds back
/// the ground in front of void edges that face the observer. The phases are
/// intersected at the end.
///
/// # Example
///
/// ```
/// use isovist::geometry::Polygon;
/// use isovist::math::Point3;
/// use isovist::{Isovist, IsovistOutcome};
///
/// let room = Polygon::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]).unwrap();
/// let pillar = Polygon::from_xy(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]).unwrap();
/// let voids = [pillar];
/// let outcome = Isovist::new(&room, Point3::new(1.0, 1.0, 0.0))
///     .with_voids(&voids)
///     .execute()
///     .unwrap();
/// assert!(matches!(outcome, IsovistOutcome::Visible(ref ps) if ps.len() == 1));
/// ```
pub struct Isovist<'a> {
    master: &'a Polygon,
    voids: &'a [Polygon],
    observer: Point3,
    config: IsovistConfig,
}

impl<'a> Isovist<'a> {
    /// Creates a query for `observer` inside `master` with no voids.
    #[must_use]
    pub fn new(master: &'a Polygon, observer: Point3) -> Self {
        Self {
            master,
            voids: &[],
            observer,
            config: IsovistConfig::default(),
        }
    }

    /// Sets the obstructions inside the master.
    #[must_use]
    pub fn with_voids(mut self, voids: &'a [Polygon]) -> Self {
        self.voids = voids;
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: IsovistConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the query on the default [`OverlayKernel`].
    ///
    /// # Errors
    ///
    /// See [`Isovist::execute_with`].
    pub fn execute(&self) -> Result<IsovistOutcome> {
        self.execute_with(&OverlayKernel::new(self.config.tolerance))
    }

    /// Runs the query on a caller-supplied region kernel.
    ///
    /// The kernel's own tolerance drives the boolean steps; the configured
    /// tolerance drives input validation.
    ///
    /// # Errors
    ///
    /// Returns `InputError::ObserverOutside` if the observer is off the
    /// master's plane or outside the master, `InputError::NotCoplanar` if a
    /// void leaves that plane, `InputError::InvalidParameter` for an
    /// unusable configuration, and a geometry error if the master has no
    /// well-defined plane.
    pub fn execute_with<K: RegionKernel>(&self, kernel: &K) -> Result<IsovistOutcome> {
        self.config.validate()?;
        let tol = self.config.tolerance;
        let plane = self.master.plane()?;
        let master = self.master.to_contour(&plane)?;

        let outside = || InputError::ObserverOutside {
            x: self.observer.x,
            y: self.observer.y,
            z: self.observer.z,
        };
        if !plane.contains_point(&self.observer, tol) {
            return Err(outside().into());
        }
        let observer = plane.project(&self.observer);
        if !master.contains(&observer, tol) {
            return Err(outside().into());
        }

        let voids = self
            .voids
            .iter()
            .map(|void| {
                if void.vertices().iter().any(|v| !plane.contains_point(v, tol)) {
                    return Err(InputError::NotCoplanar.into());
                }
                void.to_contour(&plane)
            })
            .collect::<Result<Vec<Contour>>>()?;

        let reach = self.config.range_factor * master.bounding_diagonal();
        debug!(voids = voids.len(), reach, "isovist started");

        let own = self_visible(kernel, &master, &observer, reach);
        if voids.is_empty() {
            return Ok(IsovistOutcome::Visible(lift(&own, &plane)));
        }

        let beyond = void_visible(kernel, &master, &voids, &observer, reach);
        match combine(kernel, &own, &beyond, &self.config.retry) {
            Combined::Regions(regions) => Ok(IsovistOutcome::Visible(lift(&regions, &plane))),
            Combined::Exhausted { attempts } => {
                warn!(attempts, "isovist did not converge");
                Ok(IsovistOutcome::Indeterminate { attempts })
            }
        }
    }
}

fn lift(regions: &[Contour], plane: &Plane) -> Vec<Polygon> {
    regions.iter().map(|c| Polygon::from_contour(c, plane)).collect()
}

/// Classifies `curves`, checks the observer against the result, and runs
/// the isovist query.
///
/// # Errors
///
/// Everything [`ClassifyRegions::execute`] and [`Isovist::execute`]
/// return, plus `InputError::ObserverInsideVoid` when the observer stands
/// strictly inside a void.
pub fn compute_isovist(curves: &[Polygon], observer: Point3, config: IsovistConfig) -> Result<IsovistOutcome> {
    let regions = ClassifyRegions::new(curves).with_config(config).execute()?;
    let tol = config.tolerance;

    let projected = regions.plane.project(&observer);
    for (index, void) in regions.voids.iter().enumerate() {
        if void.to_contour(&regions.plane)?.contains_strictly(&projected, tol) {
            return Err(InputError::ObserverInsideVoid {
                index,
                x: observer.x,
                y: observer.y,
                z: observer.z,
            }
            .into());
        }
    }

    info!(
        curves = curves.len(),
        voids = regions.voids.len(),
        "computing isovist"
    );
    Isovist::new(&regions.master, observer)
        .with_voids(&regions.voids)
        .with_config(config)
        .execute()
}
