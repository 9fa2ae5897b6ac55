//! Chat provider error types.
//!
//! [`ChatApiError`] is the chat provider's own failure vocabulary. It is
//! mapped onto [`CoreError`] at the provider boundary so the attempt
//! runner classifies chat failures with the same rules as plain HTTP calls.

use cctv_core::{Error as CoreError, TransportKind};
use thiserror::Error;

/// Target name used in errors raised by the chat path.
pub const CHAT_TARGET: &str = "chat completions";

/// Chat provider failures.
#[derive(Debug, Error)]
pub enum ChatApiError {
    /// The per-attempt deadline elapsed.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The provider could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider throttled the request (HTTP 429).
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The provider reported an error, with or without a status.
    #[error("API error ({}): {message}", status_text(.status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// A 2xx response whose body was not JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Any failure not recognized above.
    #[error("{0}")]
    Other(String),
}

fn status_text(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "no status".to_string(),
    }
}

impl ChatApiError {
    /// Map a `reqwest` failure onto the chat vocabulary.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Self::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Api {
                status: Some(status.as_u16()),
                message: err.to_string(),
            }
        } else {
            Self::Other(err.to_string())
        }
    }

    /// Error code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            ChatApiError::Timeout(_) => "TIMEOUT",
            ChatApiError::Connection(_) => "CONNECTION_ERROR",
            ChatApiError::RateLimited(_) => "RATE_LIMITED",
            ChatApiError::Api { .. } => "API_ERROR",
            ChatApiError::Decode(_) => "DECODE_ERROR",
            ChatApiError::Other(_) => "OTHER",
        }
    }
}

impl From<ChatApiError> for CoreError {
    fn from(err: ChatApiError) -> Self {
        match err {
            ChatApiError::Timeout(message) => {
                CoreError::transport(CHAT_TARGET, TransportKind::Timeout, message)
            }
            ChatApiError::Connection(message) => {
                CoreError::transport(CHAT_TARGET, TransportKind::Connect, message)
            }
            ChatApiError::RateLimited(message) => CoreError::status(CHAT_TARGET, Some(429), message),
            ChatApiError::Api { status, message } => CoreError::status(CHAT_TARGET, status, message),
            ChatApiError::Decode(message) => {
                CoreError::parse(format!("Failed to decode chat completion: {}", message))
            }
            ChatApiError::Other(message) => CoreError::Other(message),
        }
    }
}
