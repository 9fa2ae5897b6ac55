use std::sync::Mutex;
use std::time::Duration;

use cctv_ai::{ChatClientTrait, ChatExecutor, ChatMessage, LOG_LABEL};
use cctv_core::{ExecutorConfig, RetryPolicy};
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects formatted info-level records emitted while a test runs.
struct CapturingLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    lines: Mutex::new(Vec::new()),
};

#[tokio::test]
async fn test_headers_logged_for_rate_limited_and_successful_attempts() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Info);

    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("x-request-id", "req_1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req_2")
                .set_body_json(json!({ "choices": [{ "message": { "content": "Sunny" } }] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let policy = RetryPolicy::new(3, Duration::ZERO, Duration::ZERO).unwrap();
    let config = ExecutorConfig::new(policy, Duration::from_secs(5)).unwrap();
    let executor =
        ChatExecutor::with_base_url(config, "sk-test", &format!("{}/v1", mock_server.uri()))
            .unwrap();

    executor
        .complete("gpt-4o-mini", &[ChatMessage::user("Weather?")])
        .await
        .unwrap();

    let prefix = format!("{} x-request-id : ", LOG_LABEL);
    let lines: Vec<String> = LOGGER
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.starts_with(&prefix))
        .cloned()
        .collect();
    assert_eq!(
        lines,
        vec![
            "OpenAI response headers x-request-id : req_1".to_string(),
            "OpenAI response headers x-request-id : req_2".to_string(),
        ]
    );
}
