//! Composite result of one planning run

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::image::CoverImage;
use crate::itinerary::ItineraryResult;
use crate::links::BookingLinks;
use crate::locale::LocaleInfo;
use crate::weather::WeatherSnapshot;

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub destination: String,
    /// Display text, either the snapshot or the weather fallback
    pub weather: String,
    pub weather_snapshot: Option<WeatherSnapshot>,
    pub locale: LocaleInfo,
    pub image: CoverImage,
    pub itinerary: ItineraryResult,
    pub links: BookingLinks,
    /// User-visible warnings raised by failed steps
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
