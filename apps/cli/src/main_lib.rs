use std::sync::Arc;

use cctv_ai::ChatExecutor;
use cctv_core::Result;
use cctv_weather::OpenMeteoProvider;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::briefing::WeatherBriefing;
use crate::config::Config;

/// Install the global subscriber. Output goes to stderr so stdout only
/// carries the briefing.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_briefing(config: &Config) -> Result<WeatherBriefing> {
    let weather = OpenMeteoProvider::with_endpoints(
        config.executor,
        config.geocode_url.clone(),
        config.forecast_url.clone(),
    )?;
    let chat = ChatExecutor::with_base_url(
        config.executor,
        config.api_key.clone(),
        &config.openai_base_url,
    )?;
    tracing::debug!(
        "Using model {} with {} attempts per call",
        config.model,
        config.executor.policy.max_attempts()
    );

    Ok(WeatherBriefing::new(
        Arc::new(weather),
        Arc::new(chat),
        config.model.clone(),
    ))
}
