//! Weather provider trait and implementations.

pub mod open_meteo;

use async_trait::async_trait;
use cctv_core::Result;

use crate::models::{Location, Observation};

/// Trait for weather backends.
///
/// Implementations are expected to retry transient failures internally;
/// an `Err` returned from either method is final.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Resolve a free-form location to coordinates.
    ///
    /// An empty match list is an [`Error::EmptyResult`](cctv_core::Error::EmptyResult)
    /// naming the location; a malformed match is an
    /// [`Error::Parse`](cctv_core::Error::Parse).
    async fn geocode(&self, location: &str) -> Result<Location>;

    /// Fetch the current observation at the given coordinates.
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<Observation>;
}
