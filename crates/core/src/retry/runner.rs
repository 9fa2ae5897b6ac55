//! Bounded attempt loop.
//!
//! The runner executes an operation up to `max_attempts` times, sleeping a
//! backoff delay between retriable failures. The last failure is returned
//! unchanged: no wrapper error is introduced when attempts run out.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};

use super::{Backoff, JitteredBackoff, RetryPolicy};
use crate::errors::{Classify, RetryClass};

/// Result of a single attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttemptOutcome {
    Success,
    Failed(RetryClass),
}

/// One physical attempt within a logical call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Attempt {
    /// Ordinal, starting at 1.
    pub number: u32,
    pub outcome: AttemptOutcome,
    /// Wait inserted before the next attempt, if one followed.
    pub delay: Option<Duration>,
}

/// Final result of a run together with its attempt history.
#[derive(Debug)]
pub struct RunOutcome<T, E> {
    pub result: Result<T, E>,
    pub attempts: Vec<Attempt>,
}

/// Executes an operation with a hard attempt ceiling.
///
/// The runner holds only the immutable policy and backoff strategy; every
/// `run` call keeps its own counter and history, so one runner can serve
/// concurrent logical calls without locking.
#[derive(Clone, Debug)]
pub struct AttemptRunner<B = JitteredBackoff> {
    policy: RetryPolicy,
    backoff: B,
}

impl AttemptRunner<JitteredBackoff> {
    /// Create a runner using uniformly jittered delays.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            backoff: JitteredBackoff,
        }
    }
}

impl<B: Backoff> AttemptRunner<B> {
    /// Create a runner with a custom delay strategy.
    pub fn with_backoff(policy: RetryPolicy, backoff: B) -> Self {
        Self { policy, backoff }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds, fails fatally, or the attempt
    /// ceiling is reached.
    ///
    /// The operation receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut>(&self, label: &str, operation: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + Display,
    {
        self.run_with_history(label, operation).await.result
    }

    /// Same as [`run`](Self::run), also returning every [`Attempt`] made.
    pub async fn run_with_history<T, E, F, Fut>(&self, label: &str, mut operation: F) -> RunOutcome<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + Display,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempts = Vec::with_capacity(max_attempts as usize);
        let mut number = 1;

        loop {
            match operation(number).await {
                Ok(value) => {
                    if number > 1 {
                        debug!("{}: succeeded on attempt {}/{}", label, number, max_attempts);
                    }
                    attempts.push(Attempt {
                        number,
                        outcome: AttemptOutcome::Success,
                        delay: None,
                    });
                    return RunOutcome {
                        result: Ok(value),
                        attempts,
                    };
                }
                Err(error) => {
                    let class = error.retry_class();
                    let last_attempt = number >= max_attempts;

                    if class == RetryClass::Fatal || last_attempt {
                        if class == RetryClass::Fatal {
                            info!(
                                "{}: attempt {}/{} failed with a fatal error, not retrying: {}",
                                label, number, max_attempts, error
                            );
                        } else {
                            warn!(
                                "{}: giving up after {} attempts: {}",
                                label, number, error
                            );
                        }
                        attempts.push(Attempt {
                            number,
                            outcome: AttemptOutcome::Failed(class),
                            delay: None,
                        });
                        return RunOutcome {
                            result: Err(error),
                            attempts,
                        };
                    }

                    let delay = self.backoff.next_delay(&self.policy);
                    warn!(
                        "{}: attempt {}/{} failed ({}), retrying in {:.2}s",
                        label,
                        number,
                        max_attempts,
                        error,
                        delay.as_secs_f64()
                    );
                    attempts.push(Attempt {
                        number,
                        outcome: AttemptOutcome::Failed(class),
                        delay: Some(delay),
                    });

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    number += 1;
                }
            }
        }
    }
}
