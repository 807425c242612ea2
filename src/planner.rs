//! Trip planning pipeline
//!
//! One accepted [`TripRequest`] runs the steps strictly in order: weather,
//! locale lookup, cover image, itinerary generation, booking links. Client
//! failures arrive as tagged errors and are turned into fallback text plus a
//! user-visible warning here, so a failed step never aborts the run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::PlannerConfig;
use crate::image;
use crate::itinerary::{
    GeminiClient, GenerationError, ItineraryContext, ItineraryResult, TextGenerator, build_prompt,
};
use crate::links::BookingLinks;
use crate::locale;
use crate::models::{TripPlan, TripRequest};
use crate::weather::{OpenWeatherMapClient, WeatherError, WeatherProvider, WeatherSnapshot};
use crate::{PlannerError, Result};

pub const WEATHER_FALLBACK: &str = "Weather data not available.";
pub const ITINERARY_FALLBACK: &str = "Sorry, unable to generate itinerary right now.";
pub const INCOMPLETE_REQUEST: &str = "Please fill in all the details to generate an itinerary.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlannerState {
    Idle,
    Processing,
}

pub struct TripPlanner {
    weather: Arc<dyn WeatherProvider>,
    generator: Arc<dyn TextGenerator>,
    processing: AtomicBool,
}

/// Puts the planner back to idle when the run ends or its future is dropped
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TripPlanner {
    pub fn new(weather: Arc<dyn WeatherProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            weather,
            generator,
            processing: AtomicBool::new(false),
        }
    }

    /// Wire the OpenWeatherMap and Gemini clients from configuration
    pub fn from_config(config: &PlannerConfig) -> anyhow::Result<Self> {
        let weather = OpenWeatherMapClient::new(&config.weather)
            .context("Failed to initialize weather client")?;
        let generator = GeminiClient::new(&config.generative)
            .context("Failed to initialize generative-text client")?;
        info!("Using generative model {}", generator.model());

        Ok(Self::new(Arc::new(weather), Arc::new(generator)))
    }

    #[must_use]
    pub fn state(&self) -> PlannerState {
        if self.processing.load(Ordering::Acquire) {
            PlannerState::Processing
        } else {
            PlannerState::Idle
        }
    }

    fn begin(&self) -> Result<ProcessingGuard<'_>> {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PlannerError::Busy)?;
        Ok(ProcessingGuard(&self.processing))
    }

    /// Run the whole pipeline for one submission.
    ///
    /// Incomplete requests are rejected with a single aggregate validation
    /// error before any external call is made.
    #[instrument(skip_all, fields(destination = %request.destination, days = request.num_days))]
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan> {
        if !request.is_complete() {
            debug!(missing = ?request.missing_fields(), "Rejecting incomplete trip request");
            return Err(PlannerError::validation(INCOMPLETE_REQUEST));
        }

        let _guard = self.begin()?;
        info!("Creating itinerary for {}", request.destination);

        let mut warnings = Vec::new();

        let (weather, weather_snapshot, warning) = self.weather_step(&request.destination).await;
        warnings.extend(warning);

        let locale = locale::lookup(&request.destination);
        if !locale.is_known() {
            debug!("No currency or time zone data for {}", request.destination);
        }
        let image = image::cover_image(&request.destination, &request.interests);

        let context = ItineraryContext {
            destination: &request.destination,
            interests: &request.interests,
            weather: &weather,
            budget: &request.budget,
            occasion: &request.occasion,
            hotel_style: &request.hotel_style,
            num_days: request.num_days,
            currency: locale.currency,
            timezone: locale.timezone,
        };
        let (itinerary, warning) = self.itinerary_step(&context).await;
        warnings.extend(warning);

        let links = BookingLinks::for_destination(&request.destination);

        info!(
            generated = itinerary.generated,
            warnings = warnings.len(),
            "Itinerary ready"
        );

        Ok(TripPlan {
            destination: request.destination.clone(),
            weather,
            weather_snapshot,
            locale,
            image,
            itinerary,
            links,
            warnings,
            generated_at: Utc::now(),
        })
    }

    /// Weather display text for a destination, or the fallback on any failure
    pub async fn fetch_weather(&self, destination: &str) -> String {
        self.weather_step(destination).await.0
    }

    /// Generated markdown, or the fallback on any failure
    pub async fn generate_itinerary(&self, context: &ItineraryContext<'_>) -> String {
        self.itinerary_step(context).await.0.markdown
    }

    async fn weather_step(
        &self,
        destination: &str,
    ) -> (String, Option<WeatherSnapshot>, Option<String>) {
        match self.weather.current_weather(destination).await {
            Ok(snapshot) => (snapshot.to_string(), Some(snapshot), None),
            Err(e) => {
                warn!("Weather lookup failed: {}", e);
                (WEATHER_FALLBACK.to_string(), None, Some(weather_warning(&e)))
            }
        }
    }

    async fn itinerary_step(
        &self,
        context: &ItineraryContext<'_>,
    ) -> (ItineraryResult, Option<String>) {
        let prompt = build_prompt(context);

        match self.generator.generate(&prompt).await {
            Ok(markdown) => (
                ItineraryResult {
                    markdown,
                    generated: true,
                },
                None,
            ),
            Err(e) => {
                warn!("Itinerary generation failed: {}", e);
                let fallback = ItineraryResult {
                    markdown: ITINERARY_FALLBACK.to_string(),
                    generated: false,
                };
                (fallback, generation_warning(&e))
            }
        }
    }
}

fn weather_warning(error: &WeatherError) -> String {
    match error {
        WeatherError::MissingApiKey => {
            "OpenWeatherMap API key missing from configuration.".to_string()
        }
        other => format!("Error fetching weather data: {other}"),
    }
}

/// An empty answer is not an error worth a banner; everything else is.
fn generation_warning(error: &GenerationError) -> Option<String> {
    match error {
        GenerationError::EmptyResponse => None,
        other => Some(format!("AI integration error: {other}")),
    }
}
