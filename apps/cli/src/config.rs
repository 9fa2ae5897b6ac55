use std::str::FromStr;
use std::time::Duration;

use cctv_ai::{MODEL_ID, OPENAI_BASE_URL};
use cctv_core::constants::{
    MAX_ATTEMPTS, REQUEST_TIMEOUT_SECONDS, RETRY_BACKOFF_MAX_SECONDS, RETRY_BACKOFF_SECONDS,
};
use cctv_core::{Error, ExecutorConfig, Result, RetryPolicy};
use cctv_weather::{FORECAST_URL, GEOCODE_URL};

pub const MISSING_API_KEY: &str = "OPENAI_API_KEY is not set. Add it to .env or export it.";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub geocode_url: String,
    pub forecast_url: String,
    pub executor: ExecutorConfig,
    pub log_format: String,
}

impl Config {
    /// Load `.env` (without overriding exported variables), then read the
    /// process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = var("OPENAI_API_KEY")
            .or_else(|| var("AI_TOKEN"))
            .ok_or_else(|| Error::config(MISSING_API_KEY))?;

        let max_attempts = parse_var(&var, "CCTV_MAX_ATTEMPTS", MAX_ATTEMPTS)?;
        let min_backoff = parse_var(&var, "CCTV_MIN_BACKOFF_SECS", RETRY_BACKOFF_SECONDS as f64)?;
        let max_backoff =
            parse_var(&var, "CCTV_MAX_BACKOFF_SECS", RETRY_BACKOFF_MAX_SECONDS as f64)?;
        let timeout_secs = parse_var(&var, "CCTV_TIMEOUT_SECS", REQUEST_TIMEOUT_SECONDS as f64)?;

        let policy = RetryPolicy::from_secs_f64(max_attempts, min_backoff, max_backoff)?;
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .map_err(|_| Error::config(format!("Invalid CCTV_TIMEOUT_SECS: {}", timeout_secs)))?;

        Ok(Self {
            api_key,
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            model: var("CCTV_MODEL").unwrap_or_else(|| MODEL_ID.to_string()),
            geocode_url: var("CCTV_GEOCODE_URL").unwrap_or_else(|| GEOCODE_URL.to_string()),
            forecast_url: var("CCTV_FORECAST_URL").unwrap_or_else(|| FORECAST_URL.to_string()),
            executor: ExecutorConfig::new(policy, timeout)?,
            log_format: var("CCTV_LOG_FORMAT").unwrap_or_else(|| "text".to_string()),
        })
    }
}

fn parse_var<T, F>(var: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::config(format!("Invalid {} '{}': {}", name, raw, e))),
        None => Ok(default),
    }
}
