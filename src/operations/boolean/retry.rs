use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::geometry::Contour;

use super::RegionKernel;

/// Result of [`retry_with_escalation`].
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome {
    /// An attempt produced a non-empty result.
    Converged {
        regions: Vec<Contour>,
        /// Tolerance the successful attempt ran at.
        tolerance: f64,
        /// Number of attempts made, the successful one included.
        attempts: usize,
    },
    /// Every scheduled attempt came back empty.
    Exhausted { attempts: usize },
}

impl RetryOutcome {
    /// The regions of a converged outcome.
    #[must_use]
    pub fn regions(&self) -> Option<&[Contour]> {
        match self {
            Self::Converged { regions, .. } => Some(regions),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Runs `op` on `a` and `b`, escalating the tolerance while it returns
/// nothing.
///
/// The first attempt uses `kernel` as given. Later attempts simplify both
/// inputs at the escalated tolerance and hand `op` a kernel running at that
/// tolerance. The number of attempts never exceeds
/// [`RetryPolicy::max_attempts`].
pub fn retry_with_escalation<K, F>(kernel: &K, a: &Contour, b: &Contour, policy: &RetryPolicy, op: F) -> RetryOutcome
where
    K: RegionKernel,
    F: Fn(&K, &Contour, &Contour) -> Vec<Contour>,
{
    let base = kernel.tolerance();
    let regions = op(kernel, a, b);
    if !regions.is_empty() {
        return RetryOutcome::Converged {
            regions,
            tolerance: base,
            attempts: 1,
        };
    }

    let max_attempts = policy.max_attempts();
    for step in 1..max_attempts {
        #[allow(clippy::cast_precision_loss)]
        let tolerance = base * step as f64 * policy.step_factor;
        let escalated = kernel.with_tolerance(tolerance);
        let a = escalated.simplify(a, tolerance);
        let b = escalated.simplify(b, tolerance);
        let regions = op(&escalated, &a, &b);
        if !regions.is_empty() {
            debug!(tolerance, attempts = step + 1, "boolean operation recovered");
            return RetryOutcome::Converged {
                regions,
                tolerance,
                attempts: step + 1,
            };
        }
    }

    warn!(attempts = max_attempts, "boolean operation stayed empty at every tolerance");
    RetryOutcome::Exhausted {
        attempts: max_attempts,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::boolean::OverlayKernel;
    use std::cell::{Cell, RefCell};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        Contour::new(&[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
        .unwrap()
    }

    #[test]
    fn first_success_returns_immediately() {
        let k = OverlayKernel::new(1e-6);
        let calls = Cell::new(0);
        let out = retry_with_escalation(
            &k,
            &rect(0.0, 0.0, 2.0, 2.0),
            &rect(1.0, 1.0, 3.0, 3.0),
            &RetryPolicy::default(),
            |k, a, b| {
                calls.set(calls.get() + 1);
                k.intersection(a, b)
            },
        );
        assert_eq!(calls.get(), 1);
        match out {
            RetryOutcome::Converged { attempts, tolerance, .. } => {
                assert_eq!(attempts, 1);
                assert!((tolerance - 1e-6).abs() < 1e-15);
            }
            RetryOutcome::Exhausted { .. } => panic!("expected convergence"),
        }
    }

    #[test]
    fn always_empty_terminates_within_bound() {
        let k = OverlayKernel::new(1e-6);
        let policy = RetryPolicy::default();
        let calls = Cell::new(0);
        let out = retry_with_escalation(&k, &rect(0.0, 0.0, 1.0, 1.0), &rect(0.0, 0.0, 1.0, 1.0), &policy, |_, _, _| {
            calls.set(calls.get() + 1);
            Vec::new()
        });
        assert_eq!(out, RetryOutcome::Exhausted { attempts: 51 });
        assert_eq!(calls.get(), policy.max_attempts());
    }

    #[test]
    fn tolerance_escalates_by_step() {
        let k = OverlayKernel::new(1e-6);
        let seen = RefCell::new(Vec::new());
        let out = retry_with_escalation(
            &k,
            &rect(0.0, 0.0, 1.0, 1.0),
            &rect(0.0, 0.0, 1.0, 1.0),
            &RetryPolicy::default(),
            |k, a, _| {
                seen.borrow_mut().push(k.tolerance());
                if seen.borrow().len() == 3 {
                    vec![a.clone()]
                } else {
                    Vec::new()
                }
            },
        );
        let seen = seen.into_inner();
        assert_eq!(seen.len(), 3);
        assert!((seen[1] - 1e-4).abs() < 1e-12);
        assert!((seen[2] - 2e-4).abs() < 1e-12);
        assert_eq!(out.regions().map(<[Contour]>::len), Some(1));
    }
}
