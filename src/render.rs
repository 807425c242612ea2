//! Markdown rendering of a finished trip plan

use std::fmt::Display;

use crate::models::TripPlan;

impl Display for TripPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "## Your Personalized Itinerary")?;
        writeln!(f)?;
        writeln!(f, "![{}]({})", self.image.caption, self.image.url)?;
        writeln!(f)?;
        writeln!(f, "**Current Weather:** {}", self.weather)?;
        writeln!(f)?;
        writeln!(f, "**Currency:** {}", self.locale.currency)?;
        writeln!(f)?;
        writeln!(f, "**Time Zone:** {}", self.locale.timezone)?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "{}", self.itinerary.markdown.trim_end())?;
        writeln!(f)?;

        if !self.warnings.is_empty() {
            for warning in &self.warnings {
                writeln!(f, "> ⚠️ {warning}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "## Booking Information")?;
        writeln!(f)?;
        writeln!(
            f,
            "**Find Hotels:** [Search Hotels in {}]({})",
            self.destination, self.links.hotels
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "**Find Flights:** [Search Flights to {}]({})",
            self.destination, self.links.flights
        )
    }
}
