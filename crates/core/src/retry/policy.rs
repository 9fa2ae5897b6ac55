use std::time::Duration;

use crate::constants::{MAX_ATTEMPTS, RETRY_BACKOFF_MAX_SECONDS, RETRY_BACKOFF_SECONDS};
use crate::errors::{Error, Result};

/// Retry configuration for one logical call.
///
/// Immutable once constructed: `max_attempts >= 1` and
/// `min_backoff <= max_backoff` always hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    min_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    /// Create a validated retry policy.
    pub fn new(max_attempts: u32, min_backoff: Duration, max_backoff: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(Error::config("max attempts must be at least 1"));
        }
        if min_backoff > max_backoff {
            return Err(Error::config(format!(
                "min backoff ({:?}) must not exceed max backoff ({:?})",
                min_backoff, max_backoff
            )));
        }
        Ok(Self {
            max_attempts,
            min_backoff,
            max_backoff,
        })
    }

    /// Same bounds expressed in (possibly fractional) seconds.
    pub fn from_secs_f64(max_attempts: u32, min_backoff: f64, max_backoff: f64) -> Result<Self> {
        let min = seconds(min_backoff, "min backoff")?;
        let max = seconds(max_backoff, "max backoff")?;
        Self::new(max_attempts, min, max)
    }

    /// A policy that performs exactly one attempt.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            min_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn min_backoff(&self) -> Duration {
        self.min_backoff
    }

    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            min_backoff: Duration::from_secs(RETRY_BACKOFF_SECONDS),
            max_backoff: Duration::from_secs(RETRY_BACKOFF_MAX_SECONDS),
        }
    }
}

fn seconds(value: f64, name: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| Error::config(format!("{} must be a non-negative number of seconds, got {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.min_backoff(), Duration::from_secs(1));
        assert_eq!(policy.max_backoff(), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = RetryPolicy::new(0, Duration::ZERO, Duration::ZERO);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = RetryPolicy::new(3, Duration::from_secs(5), Duration::from_secs(1));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_equal_bounds_accepted() {
        let policy = RetryPolicy::new(2, Duration::from_secs(2), Duration::from_secs(2)).unwrap();
        assert_eq!(policy.min_backoff(), policy.max_backoff());
    }

    #[test]
    fn test_fractional_seconds() {
        let policy = RetryPolicy::from_secs_f64(4, 0.5, 1.5).unwrap();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.min_backoff(), Duration::from_millis(500));
        assert_eq!(policy.max_backoff(), Duration::from_millis(1500));
    }

    #[test]
    fn test_negative_seconds_rejected() {
        assert!(RetryPolicy::from_secs_f64(3, -1.0, 1.0).is_err());
        assert!(RetryPolicy::from_secs_f64(3, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_single_attempt() {
        let policy = RetryPolicy::single_attempt();
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.max_backoff(), Duration::ZERO);
    }
}
