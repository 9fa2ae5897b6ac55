//! Weather briefing orchestration.

use std::sync::Arc;

use cctv_ai::{build_summary_prompt, extract_text, ChatClientTrait};
use cctv_core::Result;
use cctv_weather::WeatherProvider;
use log::info;

/// Printed when the model returns no usable text.
pub const NO_RESPONSE_TEXT: &str = "No response text returned.";

/// Geocode, fetch current weather, and ask the chat model for a summary.
///
/// Nothing is retried here; each collaborator retries its own calls.
pub struct WeatherBriefing {
    weather: Arc<dyn WeatherProvider>,
    chat: Arc<dyn ChatClientTrait>,
    model: String,
}

impl WeatherBriefing {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        chat: Arc<dyn ChatClientTrait>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            weather,
            chat,
            model: model.into(),
        }
    }

    pub async fn run(&self, location: &str) -> Result<String> {
        let place = self.weather.geocode(location).await?;
        info!(
            "Resolved '{}' to {} ({}, {}) via {}",
            location,
            place.display_name,
            place.latitude,
            place.longitude,
            self.weather.id()
        );

        let observation = self
            .weather
            .current_weather(place.latitude, place.longitude)
            .await?;

        let prompt = build_summary_prompt(&place.display_name, &observation.to_json());
        let response = self.chat.complete(&self.model, &prompt).await?;

        let text = extract_text(Some(&response));
        if text.is_empty() {
            return Ok(NO_RESPONSE_TEXT.to_string());
        }
        Ok(text)
    }
}
