//! CCTV Weather - location and observation lookups.
//!
//! Resolves a free-form location string to coordinates and fetches the
//! current weather observation for those coordinates. Both calls go through
//! [`cctv_core::RequestExecutor`], so they inherit its retry, timeout and
//! correlation behavior.
//!
//! # Core Types
//!
//! - [`Location`] - Resolved coordinates plus a display name
//! - [`Observation`] - Opaque current-weather payload
//! - [`WeatherProvider`] - Trait implemented by weather backends
//! - [`OpenMeteoProvider`] - Open-Meteo implementation

pub mod models;
pub mod provider;

pub use models::{Location, Observation};
pub use provider::open_meteo::{OpenMeteoProvider, FORECAST_URL, GEOCODE_URL};
pub use provider::WeatherProvider;
