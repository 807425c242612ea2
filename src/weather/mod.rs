use std::fmt::Display;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;

/// Current conditions at a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius, exactly as the provider reported it
    pub temperature: Number,
    /// Free-text description, e.g. "light rain"
    pub description: String,
}

impl WeatherSnapshot {
    /// Format temperature with unit, without rounding
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }
}

impl Display for WeatherSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with {}.", self.format_temperature(), self.description)
    }
}

/// Why a weather lookup produced no snapshot
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("OpenWeatherMap API key missing from configuration")]
    MissingApiKey,

    #[error("weather request failed: {0}")]
    Transport(String),

    #[error("weather API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid weather payload: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// One lookup, no retries
    async fn current_weather(&self, destination: &str) -> Result<WeatherSnapshot, WeatherError>;
}
