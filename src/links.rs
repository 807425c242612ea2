//! Outbound hotel and flight search links

const HOTEL_SEARCH_FILTERS: &str =
    "&tbm=lcl&tbs=lrf:!1m4!1u3!2m2!3m1!1e1!2m1!1e3!3sIAE,lf:1,lf_ui:6";

/// Search links shown in the booking section
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BookingLinks {
    pub hotels: String,
    pub flights: String,
}

impl BookingLinks {
    #[must_use]
    pub fn for_destination(destination: &str) -> Self {
        Self {
            hotels: hotel_search_link(destination),
            flights: flight_search_link(destination),
        }
    }
}

/// Only spaces are replaced; reserved characters pass through untouched.
fn plus_separated(query: &str) -> String {
    query.replace(' ', "+")
}

/// Local hotel search for the destination
#[must_use]
pub fn hotel_search_link(destination: &str) -> String {
    format!(
        "https://www.google.com/search?q={}{}",
        plus_separated(&format!("{destination} hotels")),
        HOTEL_SEARCH_FILTERS
    )
}

/// Flight search towards the destination
#[must_use]
pub fn flight_search_link(destination: &str) -> String {
    format!(
        "https://www.google.com/flights?q={}",
        plus_separated(&format!("Flights to {destination}"))
    )
}
