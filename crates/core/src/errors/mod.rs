//! Error types and retry classification for outbound calls.
//!
//! This module provides:
//! - [`Error`]: the single failure representation shared by every provider adapter
//! - [`RetryClass`]: the two-valued retry judgment
//! - [`classify`] / [`classify_status`]: the pure classification rules

mod retry;

pub use retry::{classify_status, Classify, RetryClass};

use thiserror::Error;

use crate::constants::ERROR_BODY_EXCERPT_CHARS;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong below the HTTP layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportKind {
    /// The per-attempt deadline elapsed.
    Timeout,
    /// Name resolution or connection establishment failed.
    Connect,
    /// The connection broke while sending the request or reading the body.
    Io,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connect => write!(f, "connection error"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

/// Errors that can occur while calling a remote service.
///
/// Each variant is classified into a [`RetryClass`] via
/// [`retry_class`](Classify::retry_class). Only `Transport` and some
/// `Status` failures are ever retried.
#[derive(Error, Debug)]
pub enum Error {
    /// No response was obtained at all.
    #[error("{kind} calling {target}: {message}")]
    Transport {
        /// The endpoint being called
        target: String,
        kind: TransportKind,
        message: String,
    },

    /// A response was obtained but its status was outside 200-299.
    #[error("{target} returned {}: {message}", status_label(.status))]
    Status {
        /// The endpoint being called
        target: String,
        /// `None` when the provider reported an error without a status
        status: Option<u16>,
        message: String,
    },

    /// The call succeeded but carried no usable result.
    #[error("{0}")]
    EmptyResult(String),

    /// The payload did not have the expected shape.
    #[error("{0}")]
    Parse(String),

    /// Invalid or missing configuration.
    #[error("{0}")]
    Config(String),

    /// Any failure not recognized as one of the above.
    #[error("{0}")]
    Other(String),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "an error without status".to_string(),
    }
}

impl Error {
    /// Create a new transport error.
    pub fn transport(target: impl Into<String>, kind: TransportKind, message: impl Into<String>) -> Self {
        Self::Transport {
            target: target.into(),
            kind,
            message: message.into(),
        }
    }

    /// Create a new status error, keeping only an excerpt of the body.
    pub fn status(target: impl Into<String>, status: Option<u16>, message: impl AsRef<str>) -> Self {
        Self::Status {
            target: target.into(),
            status,
            message: excerpt(message.as_ref()),
        }
    }

    /// Create a new empty result error.
    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }

    /// Create a new parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Map a `reqwest` failure onto the shared taxonomy.
    ///
    /// Timeouts, connection failures (including name resolution) and broken
    /// request/body streams become [`Error::Transport`]. A failure carrying a
    /// status becomes [`Error::Status`]. Builder and redirect failures, and
    /// anything unrecognized, become [`Error::Other`].
    pub fn from_reqwest(target: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport(target, TransportKind::Timeout, err.to_string())
        } else if err.is_connect() {
            Self::transport(target, TransportKind::Connect, err.to_string())
        } else if err.is_request() || err.is_body() {
            Self::transport(target, TransportKind::Io, err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(target, Some(status.as_u16()), err.to_string())
        } else {
            Self::Other(format!("Request to {} failed: {}", target, err))
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => *status,
            _ => None,
        }
    }
}

impl Classify for Error {
    fn retry_class(&self) -> RetryClass {
        match self {
            Self::Transport { .. } => RetryClass::Retriable,
            Self::Status { status, .. } => classify_status(*status),
            Self::EmptyResult(_) | Self::Parse(_) | Self::Config(_) | Self::Other(_) => {
                RetryClass::Fatal
            }
        }
    }
}

/// Classify a failure. Pure: the same failure always yields the same class.
pub fn classify(error: &Error) -> RetryClass {
    error.retry_class()
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(ERROR_BODY_EXCERPT_CHARS).collect();
    format!("{}...", cut)
}
