//! Weather and clothing briefing for a named location.
//!
//! `briefing` sequences geocoding, the current-weather lookup and the chat
//! summary; `config` reads settings from the environment; `main_lib` wires
//! the concrete providers and logging for the `cctv` binary.

pub mod briefing;
pub mod config;
pub mod main_lib;

pub use briefing::{WeatherBriefing, NO_RESPONSE_TEXT};
pub use config::{Config, MISSING_API_KEY};
