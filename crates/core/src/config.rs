use std::time::Duration;

use crate::constants::REQUEST_TIMEOUT_SECONDS;
use crate::errors::{Error, Result};
use crate::retry::RetryPolicy;

/// Settings shared by every executor: retry policy plus per-attempt deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub policy: RetryPolicy,
    pub timeout: Duration,
}

impl ExecutorConfig {
    pub fn new(policy: RetryPolicy, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::config("request timeout must be greater than zero"));
        }
        Ok(Self { policy, timeout })
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            policy: RetryPolicy::default(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECONDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.policy, RetryPolicy::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = ExecutorConfig::new(RetryPolicy::default(), Duration::ZERO);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
