//! Flight catalog record

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{Result, TravelPlannerError};

/// A scheduled flight. Arrival after departure is a trust assumption on the
/// catalog; the loader only warns about records that violate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub airline: String,
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    /// Ticket price in rupees
    pub price: u64,
    /// ISO 8601 timestamp, with or without offset
    pub departure_time: String,
    /// ISO 8601 timestamp, with or without offset
    pub arrival_time: String,
}

impl Flight {
    /// Calendar date part (`YYYY-MM-DD`) of the departure timestamp
    #[must_use]
    pub fn departure_date(&self) -> &str {
        self.departure_time.get(..10).unwrap_or(&self.departure_time)
    }

    /// Departure timestamp matches a date-only string by prefix
    #[must_use]
    pub fn departs_on(&self, date: &str) -> bool {
        self.departure_time.starts_with(date)
    }

    /// Flight time in seconds (arrival minus departure)
    pub fn duration_seconds(&self) -> Result<i64> {
        let departure = parse_timestamp(&self.departure_time)?;
        let arrival = parse_timestamp(&self.arrival_time)?;
        Ok((arrival - departure).num_seconds())
    }
}

/// Parse an ISO 8601 timestamp. Offset-aware values are compared in UTC,
/// naive values as-is.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| TravelPlannerError::validation(format!("Malformed timestamp '{value}'")))
}

impl Display for Flight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} -> {} | {} | Dep: {} | Arr: {}",
            self.airline,
            self.origin,
            self.destination,
            super::format_amount(self.price),
            self.departure_time,
            self.arrival_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(departure: &str, arrival: &str) -> Flight {
        Flight {
            airline: "IndiGo".to_string(),
            origin: "Mumbai".to_string(),
            destination: "Goa".to_string(),
            price: 3200,
            departure_time: departure.to_string(),
            arrival_time: arrival.to_string(),
        }
    }

    #[test]
    fn test_deserialize_catalog_keys() {
        let json = r#"{"airline":"Vistara","from":"Delhi","to":"Jaipur","price":2800,
            "departure_time":"2025-01-10T06:00:00","arrival_time":"2025-01-10T07:05:00"}"#;
        let parsed: Flight = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.origin, "Delhi");
        assert_eq!(parsed.destination, "Jaipur");
        assert_eq!(parsed.duration_seconds().unwrap(), 65 * 60);
    }

    #[test]
    fn test_duration_with_offsets() {
        let f = flight("2025-01-10T08:00:00+05:30", "2025-01-10T09:15:00+05:30");
        assert_eq!(f.duration_seconds().unwrap(), 75 * 60);
    }

    #[test]
    fn test_malformed_timestamp_is_validation_error() {
        let f = flight("tomorrow morning", "2025-01-10T09:15:00");
        let err = f.duration_seconds().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_departure_date_prefix() {
        let f = flight("2025-01-10T08:00:00", "2025-01-10T09:15:00");
        assert_eq!(f.departure_date(), "2025-01-10");
        assert!(f.departs_on("2025-01-10"));
        assert!(!f.departs_on("2025-01-11"));
    }

    #[test]
    fn test_display() {
        let f = flight("2025-01-10T08:00:00", "2025-01-10T09:15:00");
        assert_eq!(
            f.to_string(),
            "IndiGo | Mumbai -> Goa | ₹3200 | Dep: 2025-01-10T08:00:00 | Arr: 2025-01-10T09:15:00"
        );
    }
}
