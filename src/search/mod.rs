//! Search, filter and sort over the in-memory catalogs
//!
//! Each catalog has its own query type and sort key. Every search validates
//! its required fields, filters with case- and whitespace-insensitive
//! matching, then applies a stable sort. An empty result is not an error.

pub mod flights;
pub mod hotels;
pub mod places;

pub use flights::{FlightQuery, FlightSort, search_flights};
pub use hotels::{HotelQuery, HotelSort, search_hotels};
pub use places::{PlaceQuery, PlaceSort, search_places};

use chrono::NaiveDate;

use crate::models::normalize;
use crate::{Result, TravelPlannerError};

/// Normalize a required field, rejecting blank input
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let value = normalize(value);
    if value.is_empty() {
        return Err(TravelPlannerError::validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Normalize an optional filter; blank counts as absent
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value.map(normalize).filter(|v| !v.is_empty())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TravelPlannerError::validation("Dates must be in YYYY-MM-DD format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        assert!(required("city", "   ").unwrap_err().is_invalid_argument());
        assert_eq!(required("city", " Goa ").unwrap(), "goa");
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some("Taj")), Some("taj".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert!(parse_date("10/01/2025").unwrap_err().is_invalid_argument());
    }
}
