//! Itinerary planner - personal travel itineraries from a handful of preferences
//!
//! This library combines current weather, static currency and time zone facts
//! and a generative-text service into one markdown itinerary with booking
//! links.

pub mod api;
pub mod config;
pub mod error;
pub mod image;
pub mod itinerary;
pub mod links;
pub mod locale;
pub mod logging;
pub mod models;
pub mod planner;
pub mod render;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use crate::config::PlannerConfig;
pub use error::PlannerError;
pub use itinerary::{GeminiClient, GenerationError, ItineraryContext, TextGenerator};
pub use locale::LocaleInfo;
pub use models::{TripPlan, TripRequest};
pub use planner::{PlannerState, TripPlanner};
pub use weather::{OpenWeatherMapClient, WeatherError, WeatherProvider, WeatherSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
