use tracing::{debug, trace};

use crate::geometry::Contour;
use crate::math::Point2;
use crate::operations::boolean::{difference, RegionKernel};

use super::primitives::{genuine_crossings, is_on_segment, midpoint, wedge_behind};

/// Regions of `master` hidden from `observer` by the master's own boundary.
///
/// An edge whose midpoint is reached only after crossing the boundary
/// somewhere else sits behind a concavity; the cone through that edge,
/// beyond the edge, is unseen. Edges the observer stands on are skipped.
pub fn unseen_wedges<K: RegionKernel>(kernel: &K, master: &Contour, observer: &Point2, reach: f64) -> Vec<Contour> {
    let tol = kernel.tolerance();
    let mut wedges = Vec::new();
    for (i, (a, b)) in master.edges().enumerate() {
        if is_on_segment(observer, &a, &b, tol) {
            trace!(edge = i, "observer on edge, skipping probe");
            continue;
        }
        let crossings = genuine_crossings(kernel, observer, &midpoint(&a, &b), master);
        if crossings <= 1 {
            continue;
        }
        match wedge_behind(observer, &a, &b, reach, tol) {
            Some(wedge) => {
                trace!(edge = i, crossings, "edge occluded by boundary");
                wedges.push(wedge);
            }
            None => trace!(edge = i, "degenerate wedge dropped"),
        }
    }
    wedges
}

/// The part of `master` not hidden by its own concavities.
///
/// With no occluded edges the master comes back unchanged.
pub fn self_visible<K: RegionKernel>(kernel: &K, master: &Contour, observer: &Point2, reach: f64) -> Vec<Contour> {
    let wedges = unseen_wedges(kernel, master, observer, reach);
    if wedges.is_empty() {
        return vec![master.clone()];
    }

    let mut unseen = kernel.union(&wedges);
    if unseen.is_empty() {
        debug!(wedges = wedges.len(), "wedge union empty, subtracting raw wedges");
        unseen = wedges;
    }
    let visible = difference(kernel, std::slice::from_ref(master), &unseen);
    debug!(unseen = unseen.len(), fragments = visible.len(), "self-occlusion resolved");
    visible
}
