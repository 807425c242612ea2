//! Cover image shown above the itinerary

use serde::Serialize;

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://placehold.co/1024x576/1e88e5/ffffff?text=Travel+is+Calling!";
pub const COVER_CAPTION: &str = "Ready for your trip!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverImage {
    pub url: String,
    pub caption: String,
}

/// Pick the cover image for a trip. Always the placeholder for now; the
/// inputs are the ones an image-generation backend would need.
#[must_use]
pub fn cover_image(_destination: &str, _interests: &str) -> CoverImage {
    CoverImage {
        url: PLACEHOLDER_IMAGE_URL.to_string(),
        caption: COVER_CAPTION.to_string(),
    }
}
