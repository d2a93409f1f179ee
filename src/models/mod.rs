//! Data models for the trip planner
//!
//! Catalog records are read-only and loaded from static JSON files:
//! - Flight: a scheduled flight between two cities
//! - Hotel: a bookable stay with a nightly price
//! - Place: a point of interest in a city
//!
//! Forecast days are produced only by the weather client.

pub mod flight;
pub mod forecast;
pub mod hotel;
pub mod place;

// Re-export all public types for convenient access
pub use flight::Flight;
pub use forecast::ForecastDay;
pub use hotel::Hotel;
pub use place::Place;

/// Currency prefix used for every rendered amount
pub const CURRENCY_SYMBOL: &str = "₹";

/// Lowercase and trim a city or label for exact matching
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Render an amount with the currency prefix
#[must_use]
pub fn format_amount(amount: u64) -> String {
    format!("{CURRENCY_SYMBOL}{amount}")
}
