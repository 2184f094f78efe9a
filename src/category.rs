//! Data categories served by the proxy.
//!
//! Each inbound request resolves to one [`Category`] before any cache or
//! upstream interaction. A category owns its cache key, its upstream URL,
//! and the failure message reported when no data can be served at all.

use crate::config::Config;
use std::fmt;

/// One of the cities with a dedicated historical-data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Damascus,
    Aleppo,
    Idlib,
}

impl City {
    /// All cities with a historical-data endpoint.
    pub const ALL: [City; 3] = [City::Damascus, City::Aleppo, City::Idlib];

    /// Parse a city name case-insensitively.
    ///
    /// Returns `None` for anything outside the known set; the caller turns
    /// that into a client input error.
    pub fn parse(name: &str) -> Option<City> {
        match name.to_ascii_lowercase().as_str() {
            "damascus" => Some(City::Damascus),
            "aleppo" => Some(City::Aleppo),
            "idlib" => Some(City::Idlib),
            _ => None,
        }
    }

    /// Lowercase canonical name, used in cache keys and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Damascus => "damascus",
            City::Aleppo => "aleppo",
            City::Idlib => "idlib",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kind of data the proxy serves: the latest rates, or per-city history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    LatestRates,
    History(City),
}

impl Category {
    /// Cache key for this category. One key per category, lowercase-normalized.
    pub fn cache_key(&self) -> String {
        match self {
            Category::LatestRates => "rates".to_string(),
            Category::History(city) => format!("history_{}", city),
        }
    }

    /// The configured upstream endpoint for this category.
    pub fn upstream_url<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Category::LatestRates => &config.rates_url,
            Category::History(City::Damascus) => &config.damascus_history_url,
            Category::History(City::Aleppo) => &config.aleppo_history_url,
            Category::History(City::Idlib) => &config.idlib_history_url,
        }
    }

    /// Message reported when upstream fails and no cached entry exists.
    pub fn failure_message(&self) -> String {
        match self {
            Category::LatestRates => "Failed to fetch exchange rates".to_string(),
            Category::History(city) => {
                format!("Failed to fetch historical data for {}", city)
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::LatestRates => f.write_str("exchange rates"),
            Category::History(city) => write!(f, "historical data for {}", city),
        }
    }
}
