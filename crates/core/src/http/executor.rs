use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::headers::log_headers;
use crate::config::ExecutorConfig;
use crate::correlation::{CorrelationId, CORRELATION_HEADER};
use crate::errors::{Error, Result};
use crate::retry::AttemptRunner;

/// A successful (2xx) response with its body already read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl HttpResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| Error::parse(format!("Failed to decode response body: {}", e)))
    }
}

/// Issues read-only GET calls under the retry policy.
///
/// Each physical attempt gets its own [`CorrelationId`] header, runs under
/// the configured timeout, and has its response headers logged whether it
/// succeeds or not. Any status outside 200-299 is a status failure.
pub struct RequestExecutor {
    client: Client,
    runner: AttemptRunner,
}

impl RequestExecutor {
    /// Create an executor with the given retry policy and timeout.
    pub fn new(config: ExecutorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            runner: AttemptRunner::new(config.policy),
        })
    }

    /// GET `url` with query `params`, retrying retriable failures.
    ///
    /// `label` prefixes the logged response headers.
    pub async fn get(&self, label: &str, url: &str, params: &[(&str, String)]) -> Result<HttpResponse> {
        self.runner
            .run(url, |attempt| self.get_once(label, url, params, attempt))
            .await
    }

    async fn get_once(
        &self,
        label: &str,
        url: &str,
        params: &[(&str, String)],
        attempt: u32,
    ) -> Result<HttpResponse> {
        let correlation_id = CorrelationId::new();
        debug!(
            "GET {} (attempt {}, {}: {})",
            url, attempt, CORRELATION_HEADER, correlation_id
        );

        let response = self
            .client
            .get(url)
            .query(params)
            .header(CORRELATION_HEADER, correlation_id.as_str())
            .send()
            .await
            .map_err(|e| Error::from_reqwest(url, &e))?;

        let status = response.status();
        let headers = response.headers().clone();
        log_headers(label, &headers);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(url, Some(status.as_u16()), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(url, &e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
