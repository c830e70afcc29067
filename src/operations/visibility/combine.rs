use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::geometry::Contour;
use crate::operations::boolean::{retry_with_escalation, RegionKernel, RetryOutcome};

/// Outcome of intersecting the self-visible and void-visible areas.
#[derive(Debug, Clone, PartialEq)]
pub enum Combined {
    Regions(Vec<Contour>),
    /// Every pair stayed empty through the whole retry schedule.
    Exhausted { attempts: usize },
}

/// Intersects every fragment of `self_visible` with every fragment of
/// `void_visible` and merges the results.
///
/// An empty product is retried pair by pair with escalating tolerance.
pub fn combine<K: RegionKernel>(
    kernel: &K,
    self_visible: &[Contour],
    void_visible: &[Contour],
    policy: &RetryPolicy,
) -> Combined {
    let mut pieces = Vec::new();
    for a in self_visible {
        for b in void_visible {
            pieces.extend(kernel.intersection(a, b));
        }
    }
    if !pieces.is_empty() {
        return Combined::Regions(merge(kernel, pieces));
    }
    if self_visible.is_empty() || void_visible.is_empty() {
        warn!(
            self_visible = self_visible.len(),
            void_visible = void_visible.len(),
            "nothing to combine"
        );
        return Combined::Regions(Vec::new());
    }

    debug!("combined area empty, escalating tolerance");
    let mut attempts = 0;
    for a in self_visible {
        for b in void_visible {
            match retry_with_escalation(kernel, a, b, policy, |k, a, b| k.intersection(a, b)) {
                RetryOutcome::Converged { regions, .. } => pieces.extend(regions),
                RetryOutcome::Exhausted { attempts: n } => attempts += n,
            }
        }
    }
    if pieces.is_empty() {
        return Combined::Exhausted { attempts };
    }
    Combined::Regions(merge(kernel, pieces))
}

fn merge<K: RegionKernel>(kernel: &K, pieces: Vec<Contour>) -> Vec<Contour> {
    if pieces.len() == 1 {
        return pieces;
    }
    let merged = kernel.union(&pieces);
    if merged.is_empty() {
        debug!(pieces = pieces.len(), "merge of combined pieces empty, keeping pieces");
        return pieces;
    }
    merged
}
