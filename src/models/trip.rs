//! Trip request submitted through the form, the API or the command line

use serde::{Deserialize, Serialize};

/// Travel preferences for one submission. Free text is accepted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRequest {
    /// Destination city, state or country, e.g. "Paris, France"
    pub destination: String,
    /// Hobbies and interests, comma-separated
    pub interests: String,
    /// Budget label, e.g. "Mid-Range"
    pub budget: String,
    /// Occasion, e.g. "Family Vacation"
    pub occasion: String,
    /// Accommodation style, e.g. "Boutique Hotel"
    pub hotel_style: String,
    /// Trip length in days, at least 1
    pub num_days: u32,
}

impl TripRequest {
    /// Names of the required fields that are empty
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("destination", &self.destination),
            ("interests", &self.interests),
            ("budget", &self.budget),
            ("occasion", &self.occasion),
            ("hotel_style", &self.hotel_style),
        ] {
            if value.is_empty() {
                missing.push(name);
            }
        }
        if self.num_days == 0 {
            missing.push("num_days");
        }
        missing
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
