use crate::error::{InputError, Result};
use crate::math::DEFAULT_TOLERANCE;

/// Escalation schedule for retrying a boolean operation that came back
/// empty.
///
/// Attempt `k` (counting from 0) runs at `tolerance * k * step_factor`,
/// with attempt 0 at the nominal tolerance, until the factor would exceed
/// `max_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Factor added to the tolerance multiplier after each failed attempt.
    pub step_factor: f64,
    /// Largest tolerance multiplier that is still attempted.
    pub max_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            step_factor: 100.0,
            max_factor: 5000.0,
        }
    }
}

impl RetryPolicy {
    /// Upper bound on the number of attempts, including the nominal one.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        if self.step_factor <= 0.0 || self.max_factor < self.step_factor {
            return 1;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (self.max_factor / self.step_factor).floor() as usize;
        1 + steps
    }
}

/// Parameters for an isovist query.
///
/// Passed explicitly into every entry point; nothing is read from ambient
/// state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsovistConfig {
    /// Absolute distance below which two points coincide. Used by every
    /// predicate and boolean operation.
    pub tolerance: f64,
    /// Sight rays are cut at `range_factor` times the master's bounding
    /// diagonal.
    pub range_factor: f64,
    /// Schedule for the combine step's retry.
    pub retry: RetryPolicy,
}

impl Default for IsovistConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            range_factor: 1.1,
            retry: RetryPolicy::default(),
        }
    }
}

impl IsovistConfig {
    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the sight-ray length factor.
    #[must_use]
    pub fn with_range_factor(mut self, range_factor: f64) -> Self {
        self.range_factor = range_factor;
        self
    }

    /// Sets the retry schedule.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Checks that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidParameter` for a non-positive tolerance,
    /// a range factor that would not reach past the master (`<= 1`), or a
    /// non-positive retry step.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(InputError::InvalidParameter {
                name: "tolerance",
                reason: format!("must be positive and finite, got {}", self.tolerance),
            }
            .into());
        }
        if !(self.range_factor.is_finite() && self.range_factor > 1.0) {
            return Err(InputError::InvalidParameter {
                name: "range_factor",
                reason: format!("must be greater than 1, got {}", self.range_factor),
            }
            .into());
        }
        if !(self.retry.step_factor.is_finite() && self.retry.step_factor > 0.0) {
            return Err(InputError::InvalidParameter {
                name: "retry.step_factor",
                reason: format!("must be positive, got {}", self.retry.step_factor),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_has_fifty_one_attempts() {
        assert_eq!(RetryPolicy::default().max_attempts(), 51);
    }

    #[test]
    fn degenerate_schedule_runs_once() {
        let policy = RetryPolicy {
            step_factor: 0.0,
            max_factor: 10.0,
        };
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn builders_set_fields() {
        let cfg = IsovistConfig::default().with_tolerance(1e-3).with_range_factor(2.0);
        assert!((cfg.tolerance - 1e-3).abs() < f64::EPSILON);
        assert!((cfg.range_factor - 2.0).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(IsovistConfig::default().with_tolerance(0.0).validate().is_err());
        assert!(IsovistConfig::default().with_tolerance(f64::NAN).validate().is_err());
        assert!(IsovistConfig::default().with_range_factor(0.5).validate().is_err());
    }
}
