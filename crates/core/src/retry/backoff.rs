//! Delay strategies used between retriable failures.

use std::time::Duration;

use rand::Rng;

use super::RetryPolicy;

/// Computes the wait inserted before the next attempt.
///
/// Implementations must stay within the policy's bounds and carry no state
/// between calls.
pub trait Backoff: Send + Sync {
    fn next_delay(&self, policy: &RetryPolicy) -> Duration;
}

/// Uniformly random delay in `[min_backoff, max_backoff]`.
///
/// The band is fixed rather than growing per attempt; spreading clients
/// across it is enough to keep concurrent invocations from synchronizing.
#[derive(Clone, Copy, Debug, Default)]
pub struct JitteredBackoff;

impl Backoff for JitteredBackoff {
    fn next_delay(&self, policy: &RetryPolicy) -> Duration {
        let min = duration_nanos(policy.min_backoff());
        let max = duration_nanos(policy.max_backoff());
        if min >= max {
            return policy.min_backoff();
        }
        let nanos = rand::thread_rng().gen_range(min..=max);
        Duration::from_nanos(nanos)
    }
}

fn duration_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
