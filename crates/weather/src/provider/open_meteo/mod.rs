//! Open-Meteo weather provider implementation.
//!
//! This module provides:
//! - Location search via the geocoding `/v1/search` endpoint
//! - Current conditions via the `/v1/forecast` endpoint
//!
//! Both endpoints are keyless.
//! API documentation: https://open-meteo.com/en/docs

use async_trait::async_trait;
use log::{debug, error};
use serde::Deserialize;
use serde_json::{Map, Value};

use cctv_core::{Error, ExecutorConfig, RequestExecutor, Result};

use crate::models::{Location, Observation};
use crate::provider::WeatherProvider;

pub const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const PROVIDER_ID: &str = "OPEN_METEO";

const GEOCODE_LOG_LABEL: &str = "Geocode response headers";
const FORECAST_LOG_LABEL: &str = "Forecast response headers";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from the geocoding search endpoint
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    /// Matches, best first. Absent when nothing matched.
    #[serde(default)]
    results: Value,
}

/// `null`, `false`, zero, `""`, `[]` and `{}` all mean "no match".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Individual geocoding match
#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    name: Option<String>,
    /// First-level administrative area (state, province)
    admin1: Option<String>,
    country: Option<String>,
    latitude: Coordinate,
    longitude: Coordinate,
}

/// Coordinates normally arrive as numbers; numeric strings are tolerated.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Coordinate::Number(value) => Some(*value),
            Coordinate::Text(text) => text.trim().parse().ok(),
        }
    }
}

// ============================================================================
// OpenMeteoProvider
// ============================================================================

/// Open-Meteo geocoding and forecast provider.
pub struct OpenMeteoProvider {
    executor: RequestExecutor,
    geocode_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    /// Create a provider against the public Open-Meteo endpoints.
    pub fn new(config: ExecutorConfig) -> Result<Self> {
        Self::with_endpoints(config, GEOCODE_URL, FORECAST_URL)
    }

    /// Create a provider against custom endpoints.
    pub fn with_endpoints(
        config: ExecutorConfig,
        geocode_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            executor: RequestExecutor::new(config)?,
            geocode_url: geocode_url.into(),
            forecast_url: forecast_url.into(),
        })
    }

    fn parse_location(location: &str, body: &str) -> Result<Location> {
        let parse_failure = || Error::parse(format!("Failed to parse geocoding response for '{}'.", location));

        let response: GeocodeResponse = serde_json::from_str(body).map_err(|e| {
            error!("Error parsing geocoding response for city {}: {}", location, e);
            parse_failure()
        })?;

        if is_blank(&response.results) {
            return Err(Error::empty_result(format!(
                "No location found for '{}'.",
                location
            )));
        }

        let first = match response.results {
            Value::Array(items) => items.into_iter().next().unwrap_or_default(),
            other => {
                error!(
                    "Error parsing geocoding response for city {}: results is not a list: {}",
                    location, other
                );
                return Err(parse_failure());
            }
        };

        let matched: GeocodeMatch = serde_json::from_value(first).map_err(|e| {
            error!("Error parsing geocoding response for city {}: {}", location, e);
            parse_failure()
        })?;

        let (latitude, longitude) = match (matched.latitude.to_f64(), matched.longitude.to_f64()) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                error!(
                    "Error parsing geocoding response for city {}: non-numeric coordinates {:?}, {:?}",
                    location, matched.latitude, matched.longitude
                );
                return Err(parse_failure());
            }
        };

        Ok(Location::new(
            latitude,
            longitude,
            &[
                matched.name.as_deref(),
                matched.admin1.as_deref(),
                matched.country.as_deref(),
            ],
        ))
    }

    fn parse_observation(body: &str) -> Result<Observation> {
        let mut data: Map<String, Value> = serde_json::from_str(body)
            .map_err(|e| Error::parse(format!("Failed to parse forecast response: {}", e)))?;

        match data.remove("current_weather") {
            Some(Value::Object(fields)) => Ok(Observation::new(fields)),
            None | Some(Value::Null) => Err(Error::empty_result("Weather data missing from response.")),
            Some(other) => Err(Error::parse(format!(
                "Unexpected current_weather value in forecast response: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn geocode(&self, location: &str) -> Result<Location> {
        let params = [("name", location.to_string()), ("count", "1".to_string())];
        let response = self
            .executor
            .get(GEOCODE_LOG_LABEL, &self.geocode_url, &params)
            .await?;

        let resolved = Self::parse_location(location, response.text())?;
        debug!(
            "Geocoded '{}' to {} ({}, {})",
            location, resolved.display_name, resolved.latitude, resolved.longitude
        );
        Ok(resolved)
    }

    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<Observation> {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", "auto".to_string()),
        ];
        let response = self
            .executor
            .get(FORECAST_LOG_LABEL, &self.forecast_url, &params)
            .await?;

        Self::parse_observation(response.text())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = OpenMeteoProvider::new(ExecutorConfig::default()).unwrap();
        assert_eq!(provider.id(), "OPEN_METEO");
    }

    #[test]
    fn test_parse_location_success() {
        let body = r#"{"results":[{"name":"Dali","admin1":"Yunnan","country":"China","latitude":25.6,"longitude":100.2}]}"#;
        let location = OpenMeteoProvider::parse_location("Dali", body).unwrap();
        assert_eq!(location.latitude, 25.6);
        assert_eq!(location.longitude, 100.2);
        assert_eq!(location.display_name, "Dali, Yunnan, China");
    }

    #[test]
    fn test_parse_location_uses_first_match() {
        let body = r#"{"results":[
            {"name":"Springfield","admin1":"Illinois","country":"United States","latitude":39.8,"longitude":-89.6},
            {"name":"Springfield","admin1":"Missouri","country":"United States","latitude":37.2,"longitude":-93.3}
        ]}"#;
        let location = OpenMeteoProvider::parse_location("Springfield", body).unwrap();
        assert_eq!(location.display_name, "Springfield, Illinois, United States");
    }

    #[test]
    fn test_parse_location_accepts_numeric_strings() {
        let body = r#"{"results":[{"name":"Oslo","latitude":"59.91","longitude":" 10.75 "}]}"#;
        let location = OpenMeteoProvider::parse_location("Oslo", body).unwrap();
        assert_eq!(location.latitude, 59.91);
        assert_eq!(location.longitude, 10.75);
        assert_eq!(location.display_name, "Oslo");
    }

    #[test]
    fn test_parse_location_empty_results() {
        let error = OpenMeteoProvider::parse_location("Nowhere", r#"{"results":[]}"#).unwrap_err();
        assert!(matches!(error, Error::EmptyResult(_)));
        assert_eq!(error.to_string(), "No location found for 'Nowhere'.");
    }

    #[test]
    fn test_parse_location_missing_results() {
        let error = OpenMeteoProvider::parse_location("Nowhere", r#"{"generationtime_ms":0.5}"#).unwrap_err();
        assert!(matches!(error, Error::EmptyResult(_)));

        let error = OpenMeteoProvider::parse_location("Nowhere", r#"{"results":null}"#).unwrap_err();
        assert!(matches!(error, Error::EmptyResult(_)));
    }

    #[test]
    fn test_parse_location_blank_results() {
        for body in [
            r#"{"results":{}}"#,
            r#"{"results":false}"#,
            r#"{"results":""}"#,
            r#"{"results":0}"#,
        ] {
            let error = OpenMeteoProvider::parse_location("Nowhere", body).unwrap_err();
            assert!(matches!(error, Error::EmptyResult(_)), "{body}");
            assert_eq!(error.to_string(), "No location found for 'Nowhere'.");
        }
    }

    #[test]
    fn test_parse_location_non_list_results() {
        let body = r#"{"results":{"name":"Dali"}}"#;
        let error = OpenMeteoProvider::parse_location("Dali", body).unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
    }

    #[test]
    fn test_parse_location_missing_coordinates() {
        let body = r#"{"results":[{"name":"Dali"}]}"#;
        let error = OpenMeteoProvider::parse_location("Dali", body).unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
        assert_eq!(error.to_string(), "Failed to parse geocoding response for 'Dali'.");
    }

    #[test]
    fn test_parse_location_wrong_coordinate_type() {
        let body = r#"{"results":[{"name":"Dali","latitude":"north","longitude":100.2}]}"#;
        let error = OpenMeteoProvider::parse_location("Dali", body).unwrap_err();
        assert!(matches!(error, Error::Parse(_)));

        let body = r#"{"results":[{"name":"Dali","latitude":[1],"longitude":100.2}]}"#;
        let error = OpenMeteoProvider::parse_location("Dali", body).unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
    }

    #[test]
    fn test_parse_location_not_json() {
        let error = OpenMeteoProvider::parse_location("Dali", "<html>").unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
    }

    #[test]
    fn test_parse_observation() {
        let body = r#"{"latitude":25.6,"current_weather":{"temperature":21,"windspeed":4}}"#;
        let observation = OpenMeteoProvider::parse_observation(body).unwrap();
        assert_eq!(observation.temperature(), Some(21.0));
        assert_eq!(observation.windspeed(), Some(4.0));
    }

    #[test]
    fn test_parse_observation_missing_field() {
        let error = OpenMeteoProvider::parse_observation("{}").unwrap_err();
        assert!(matches!(error, Error::EmptyResult(_)));
        assert_eq!(error.to_string(), "Weather data missing from response.");

        let error = OpenMeteoProvider::parse_observation(r#"{"current_weather":null}"#).unwrap_err();
        assert!(matches!(error, Error::EmptyResult(_)));
    }

    #[test]
    fn test_parse_observation_wrong_shape() {
        let error = OpenMeteoProvider::parse_observation(r#"{"current_weather":"sunny"}"#).unwrap_err();
        assert!(matches!(error, Error::Parse(_)));

        let error = OpenMeteoProvider::parse_observation("[]").unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
    }
}
