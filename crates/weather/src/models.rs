//! Location and observation models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A geocoded location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Non-empty parts of name, region and country joined with ", "
    pub display_name: String,
}

impl Location {
    /// Build a location, deriving the display name from its parts.
    pub fn new(latitude: f64, longitude: f64, parts: &[Option<&str>]) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name(parts),
        }
    }
}

/// Join the non-empty parts with ", ".
pub fn display_name(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Current weather as returned by the forecast service.
///
/// Kept as structured but opaque data: it is forwarded into the prompt
/// as-is. `temperature` and `windspeed` are the fields callers can rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(Map<String, Value>);

impl Observation {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Air temperature, in the unit the service reports.
    pub fn temperature(&self) -> Option<f64> {
        self.0.get("temperature").and_then(Value::as_f64)
    }

    pub fn windspeed(&self) -> Option<f64> {
        self.0.get("windspeed").and_then(Value::as_f64)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Serialize as a compact JSON object.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<Map<String, Value>> for Observation {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
