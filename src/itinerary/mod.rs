//! Itinerary generation
//!
//! Builds the trip prompt and hands it to a [`TextGenerator`]. The structure
//! of the returned markdown (days, morning/afternoon/evening, phrases and a
//! cultural tip) is requested in the prompt and never checked afterwards.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiClient;

/// Everything the prompt mentions, embedded verbatim
#[derive(Debug, Clone)]
pub struct ItineraryContext<'a> {
    pub destination: &'a str,
    pub interests: &'a str,
    pub weather: &'a str,
    pub budget: &'a str,
    pub occasion: &'a str,
    pub hotel_style: &'a str,
    pub num_days: u32,
    pub currency: &'a str,
    pub timezone: &'a str,
}

/// Markdown itinerary, or the fallback text when generation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryResult {
    pub markdown: String,
    pub generated: bool,
}

/// Why the generative-text service produced no itinerary
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generative API rejected the credentials ({status})")]
    Unauthorized { status: u16 },

    #[error("generative API rate limit exceeded")]
    RateLimited,

    #[error("generative API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generative request failed: {0}")]
    Transport(String),

    #[error("invalid generative payload: {0}")]
    MalformedResponse(String),

    #[error("generative API returned no text")]
    EmptyResponse,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Single completion for one prompt, no retries
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Render the itinerary request. Inputs are trusted user text and are not escaped.
#[must_use]
pub fn build_prompt(ctx: &ItineraryContext<'_>) -> String {
    format!(
        "Create a detailed {days}-day travel itinerary for a trip to {destination}.\n\
         The traveler is interested in {interests}.\n\
         The budget for this trip is {budget}.\n\
         The occasion for the trip is a {occasion}.\n\
         They are looking for a {hotel_style} style of accommodation.\n\
         The current weather forecast for {destination} is {weather}.\n\
         The local currency is {currency} and the time zone is {timezone}.\n\
         \n\
         The itinerary should be fun, creative, and take the weather, budget, and occasion into account.\n\
         Please also include a small section at the end with a few basic phrases in the local language and a cultural tip.\n\
         Return the response in Markdown format with clear headings for each day, \
         and for morning, afternoon, and evening within each day.\n",
        days = ctx.num_days,
        destination = ctx.destination,
        interests = ctx.interests,
        budget = ctx.budget,
        occasion = ctx.occasion,
        hotel_style = ctx.hotel_style,
        weather = ctx.weather,
        currency = ctx.currency,
        timezone = ctx.timezone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo() -> ItineraryContext<'static> {
        ItineraryContext {
            destination: "Tokyo, Japan",
            interests: "food",
            weather: "Weather data not available.",
            budget: "Mid-Range",
            occasion: "Honeymoon",
            hotel_style: "Boutique",
            num_days: 3,
            currency: "JPY (Japanese Yen)",
            timezone: "JST (Japan Standard Time)",
        }
    }

    #[test]
    fn test_prompt_embeds_every_input() {
        let prompt = build_prompt(&tokyo());

        for expected in [
            "3-day travel itinerary",
            "trip to Tokyo, Japan",
            "interested in food",
            "budget for this trip is Mid-Range",
            "a Honeymoon",
            "Boutique style of accommodation",
            "is Weather data not available.",
            "JPY (Japanese Yen)",
            "JST (Japan Standard Time)",
        ] {
            assert!(prompt.contains(expected), "prompt is missing {expected:?}:\n{prompt}");
        }
    }

    #[test]
    fn test_prompt_requests_structure() {
        let prompt = build_prompt(&tokyo());
        assert!(prompt.contains("Markdown format"));
        assert!(prompt.contains("morning, afternoon, and evening"));
        assert!(prompt.contains("cultural tip"));
    }

    #[test]
    fn test_prompt_does_not_escape_inputs() {
        let mut ctx = tokyo();
        ctx.interests = "\"street food\" & <jazz bars>";
        assert!(build_prompt(&ctx).contains("\"street food\" & <jazz bars>"));
    }
}
