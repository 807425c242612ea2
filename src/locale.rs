//! Static currency and time zone facts for well-known destinations

use serde::Serialize;

pub const CURRENCY_UNAVAILABLE: &str = "Currency data not available.";
pub const TIMEZONE_UNAVAILABLE: &str = "Time zone not available.";

/// (destination, currency, time zone)
const LOCALE_TABLE: &[(&str, &str, &str)] = &[
    ("Paris, France", "EUR (Euro)", "CET (Central European Time)"),
    ("New York, USA", "USD (US Dollar)", "EST (Eastern Standard Time)"),
    ("Tokyo, Japan", "JPY (Japanese Yen)", "JST (Japan Standard Time)"),
    (
        "Curacao",
        "ANG (Netherlands Antillean Guilder)",
        "AST (Atlantic Standard Time)",
    ),
    ("London, UK", "GBP (British Pound Sterling)", "GMT (Greenwich Mean Time)"),
    (
        "Sydney, Australia",
        "AUD (Australian Dollar)",
        "AEST (Australian Eastern Standard Time)",
    ),
    ("Dubai, UAE", "AED (United Arab Emirates Dirham)", "GST (Gulf Standard Time)"),
    ("Rio de Janeiro, Brazil", "BRL (Brazilian Real)", "BRT (Brasilia Time)"),
    ("Cancun, Mexico", "MXN (Mexican Peso)", "EST (Eastern Standard Time)"),
];

/// Human-readable currency and time zone labels for a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleInfo {
    pub currency: &'static str,
    pub timezone: &'static str,
}

impl LocaleInfo {
    /// Whether the destination had an entry in the table
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.currency != CURRENCY_UNAVAILABLE
    }
}

/// Known destination with its labels, as exposed to the form
#[derive(Debug, Clone, Serialize)]
pub struct KnownDestination {
    pub destination: &'static str,
    #[serde(flatten)]
    pub locale: LocaleInfo,
}

/// Look up a destination by exact string match. Never fails: unknown
/// destinations, including case or whitespace variants, get the sentinels.
#[must_use]
pub fn lookup(destination: &str) -> LocaleInfo {
    LOCALE_TABLE
        .iter()
        .find(|(name, _, _)| *name == destination)
        .map_or(
            LocaleInfo {
                currency: CURRENCY_UNAVAILABLE,
                timezone: TIMEZONE_UNAVAILABLE,
            },
            |&(_, currency, timezone)| LocaleInfo { currency, timezone },
        )
}

/// All destinations of the table, in table order
#[must_use]
pub fn known_destinations() -> Vec<KnownDestination> {
    LOCALE_TABLE
        .iter()
        .map(|&(destination, currency, timezone)| KnownDestination {
            destination,
            locale: LocaleInfo { currency, timezone },
        })
        .collect()
}
