//! Retry policy, backoff strategies and the attempt runner.

mod backoff;
mod policy;
mod runner;

pub use backoff::{Backoff, JitteredBackoff};
pub use policy::RetryPolicy;
pub use runner::{Attempt, AttemptOutcome, AttemptRunner, RunOutcome};
