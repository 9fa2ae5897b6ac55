//! CCTV Core - resilient outbound calls.
//!
//! This crate wraps calls to remote HTTP services with failure
//! classification, bounded retry, jittered backoff and request correlation.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  RequestExecutor | --> |  AttemptRunner   |  (attempt ceiling)
//! +------------------+     +------------------+
//!          |                   |          |
//!          v                   v          v
//! +------------------+  +------------+  +-----------------+
//! |  CorrelationId   |  | RetryClass |  | JitteredBackoff |
//! +------------------+  +------------+  +-----------------+
//! ```
//!
//! - [`errors`]: the [`Error`] taxonomy and the [`RetryClass`] classifier
//! - [`retry`]: [`RetryPolicy`], backoff strategies and the [`AttemptRunner`]
//! - [`http`]: [`RequestExecutor`] for read-only GET calls
//! - [`correlation`]: per-attempt [`CorrelationId`] tokens

pub mod config;
pub mod constants;
pub mod correlation;
pub mod errors;
pub mod http;
pub mod retry;

pub use config::ExecutorConfig;
pub use correlation::{CorrelationId, CORRELATION_HEADER};
pub use errors::{classify, classify_status, Classify, Error, Result, RetryClass, TransportKind};
pub use http::{log_headers, render_headers, HttpResponse, RequestExecutor};
pub use retry::{
    Attempt, AttemptOutcome, AttemptRunner, Backoff, JitteredBackoff, RetryPolicy, RunOutcome,
};
