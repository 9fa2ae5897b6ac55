//! Chat-completion client.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint with plain
//! `reqwest` so every attempt can carry a correlation header and have its
//! raw response headers logged before the body is parsed.

use std::sync::Mutex;

use async_trait::async_trait;
use cctv_core::{
    log_headers, AttemptRunner, CorrelationId, Error as CoreError, ExecutorConfig, Result,
    CORRELATION_HEADER,
};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::ChatApiError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Default API root.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Label prefixed to logged response headers.
pub const LOG_LABEL: &str = "OpenAI response headers";

// ============================================================================
// Chat Client Trait
// ============================================================================

/// Produces a chat completion for a prompt.
#[async_trait]
pub trait ChatClientTrait: Send + Sync {
    /// Request one completion for `messages` from `model`.
    ///
    /// Retriable failures are retried internally; the error returned is the
    /// last attempt's.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatResponse>;
}

// ============================================================================
// HTTP Implementation
// ============================================================================

/// Chat-completion client running every request under the retry policy.
pub struct ChatExecutor {
    client: Client,
    runner: AttemptRunner,
    api_key: String,
    endpoint: String,
}

impl ChatExecutor {
    /// Create a client for the public OpenAI API.
    pub fn new(config: ExecutorConfig, api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(config, api_key, OPENAI_BASE_URL)
    }

    /// Create a client for an OpenAI-compatible API rooted at `base_url`.
    pub fn with_base_url(
        config: ExecutorConfig,
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CoreError::config("API key must not be empty"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            runner: AttemptRunner::new(config.policy),
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn create_once(
        &self,
        request: &ChatRequest<'_>,
        attempt: u32,
    ) -> std::result::Result<ChatResponse, ChatApiError> {
        let correlation_id = CorrelationId::new();
        debug!(
            "POST {} (attempt {}, {}: {})",
            self.endpoint, attempt, CORRELATION_HEADER, correlation_id
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(CORRELATION_HEADER, correlation_id.as_str())
            .json(request)
            .send()
            .await
            .map_err(ChatApiError::from_reqwest)?;

        let status = response.status();
        log_headers(LOG_LABEL, response.headers());

        if !status.is_success() {
            // The status decides the failure even if the body is unreadable.
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response.text().await.map_err(ChatApiError::from_reqwest)?;

        let value: Value =
            serde_json::from_str(&body).map_err(|e| ChatApiError::Decode(e.to_string()))?;

        if value.get("choices").is_none() {
            if let Some(error) = value.get("error") {
                return Err(ChatApiError::Api {
                    status: None,
                    message: describe_error(error),
                });
            }
        }

        match serde_json::from_value::<ChatResponse>(value) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!("Unexpected chat completion shape, treating as empty: {}", e);
                Ok(ChatResponse::default())
            }
        }
    }
}

#[async_trait]
impl ChatClientTrait for ChatExecutor {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatResponse> {
        let request = &ChatRequest { model, messages };
        self.runner
            .run(&self.endpoint, |attempt| async move {
                self.create_once(request, attempt)
                    .await
                    .map_err(CoreError::from)
            })
            .await
    }
}

/// Map a non-2xx response onto the chat vocabulary.
fn status_error(status: StatusCode, body: &str) -> ChatApiError {
    let message = error_message(body).unwrap_or_else(|| fallback_message(status, body));
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ChatApiError::RateLimited(message);
    }
    ChatApiError::Api {
        status: Some(status.as_u16()),
        message,
    }
}

/// Pull `error.message` (or a bare `error` string) out of a JSON body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("error").map(describe_error)
}

fn describe_error(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

// ============================================================================
// Fake Client for Testing
// ============================================================================

/// A fake chat client returning a fixed outcome and recording every prompt.
pub struct FakeChatClient {
    reply: std::result::Result<ChatResponse, String>,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeChatClient {
    /// Always answer with `response`.
    pub fn with_response(response: ChatResponse) -> Self {
        Self {
            reply: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with a single plain-text choice.
    pub fn with_text(text: &str) -> Self {
        Self::with_response(ChatResponse::from_text(text))
    }

    /// Always fail with a non-retriable provider error.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(model, messages)` pair received so far.
    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatClientTrait for FakeChatClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<ChatResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((model.to_string(), messages.to_vec()));
        }
        match &self.reply {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(CoreError::from(ChatApiError::Api {
                status: Some(400),
                message: message.clone(),
            })),
        }
    }
}
