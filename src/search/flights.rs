//! Flight search

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::{optional, parse_date, required};
use crate::models::{Flight, normalize};
use crate::{Result, TravelPlannerError};

/// Sort order for flight results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightSort {
    /// Cheapest first
    #[default]
    Price,
    /// Shortest flight time first
    Duration,
}

impl FromStr for FlightSort {
    type Err = TravelPlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(FlightSort::Price),
            "duration" => Ok(FlightSort::Duration),
            other => Err(TravelPlannerError::validation(format!(
                "Invalid sort_by value: {other}. Expected 'price' or 'duration'."
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    /// Date-only string (`YYYY-MM-DD`) matched against the departure prefix
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub sort: FlightSort,
}

impl FlightQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, sort: FlightSort) -> Self {
        self.sort = sort;
        self
    }

    /// Same route without the date constraint
    #[must_use]
    pub fn any_date(&self) -> Self {
        Self {
            date: None,
            ..self.clone()
        }
    }
}

/// Filter flights by route and optional date, then sort
pub fn search_flights(flights: &[Flight], query: &FlightQuery) -> Result<Vec<Flight>> {
    let origin = required("origin", &query.origin)?;
    let destination = required("destination", &query.destination)?;
    let date = optional(query.date.as_deref());
    if let Some(date) = &date {
        parse_date(date)?;
    }

    let mut results: Vec<Flight> = flights
        .iter()
        .filter(|f| normalize(&f.origin) == origin && normalize(&f.destination) == destination)
        .filter(|f| date.as_deref().is_none_or(|d| f.departs_on(d)))
        .cloned()
        .collect();

    match query.sort {
        FlightSort::Price => results.sort_by_key(|f| f.price),
        FlightSort::Duration => {
            let mut keyed = results
                .into_iter()
                .map(|f| f.duration_seconds().map(|secs| (secs, f)))
                .collect::<Result<Vec<_>>>()?;
            keyed.sort_by_key(|(secs, _)| *secs);
            results = keyed.into_iter().map(|(_, f)| f).collect();
        }
    }

    debug!(
        "Flight search {origin} -> {destination} (date: {:?}, sort: {:?}) matched {}",
        date,
        query.sort,
        results.len()
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn flight(airline: &str, from: &str, to: &str, price: u64, dep: &str, arr: &str) -> Flight {
        Flight {
            airline: airline.to_string(),
            origin: from.to_string(),
            destination: to.to_string(),
            price,
            departure_time: dep.to_string(),
            arrival_time: arr.to_string(),
        }
    }

    fn catalog() -> Vec<Flight> {
        vec![
            flight("IndiGo", "Mumbai", "Goa", 4200, "2025-01-10T06:00:00", "2025-01-10T07:30:00"),
            flight("Akasa", "Mumbai", "Goa", 3100, "2025-01-11T09:00:00", "2025-01-11T10:05:00"),
            flight("Air India", " mumbai ", "GOA", 3900, "2025-01-10T18:00:00", "2025-01-10T21:00:00"),
            flight("SpiceJet", "Delhi", "Goa", 2500, "2025-01-10T05:00:00", "2025-01-10T07:40:00"),
        ]
    }

    #[test]
    fn test_price_sort_ascending() {
        let results = search_flights(&catalog(), &FlightQuery::new("Mumbai", "Goa")).unwrap();
        let prices: Vec<u64> = results.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![3100, 3900, 4200]);
    }

    #[test]
    fn test_duration_sort_ascending() {
        let query = FlightQuery::new("mumbai", "goa").sorted_by(FlightSort::Duration);
        let results = search_flights(&catalog(), &query).unwrap();
        let airlines: Vec<&str> = results.iter().map(|f| f.airline.as_str()).collect();
        assert_eq!(airlines, vec!["Akasa", "IndiGo", "Air India"]);
    }

    #[test]
    fn test_date_filter_uses_departure_prefix() {
        let query = FlightQuery::new("Mumbai", "Goa").on("2025-01-10");
        let results = search_flights(&catalog(), &query).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|f| f.departs_on("2025-01-10")));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let query = FlightQuery::new("Chennai", "Jaipur");
        assert!(search_flights(&catalog(), &query).unwrap().is_empty());
    }

    #[test]
    fn test_sort_key_does_not_change_result_set() {
        let by_price = search_flights(&catalog(), &FlightQuery::new("Mumbai", "Goa")).unwrap();
        let mut by_duration = search_flights(
            &catalog(),
            &FlightQuery::new("Mumbai", "Goa").sorted_by(FlightSort::Duration),
        )
        .unwrap();
        by_duration.sort_by_key(|f| f.price);
        assert_eq!(by_price, by_duration);
    }

    #[rstest]
    #[case("", "Goa")]
    #[case("Mumbai", "  ")]
    fn test_missing_city_rejected(#[case] origin: &str, #[case] destination: &str) {
        let err = search_flights(&catalog(), &FlightQuery::new(origin, destination)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_malformed_date_rejected() {
        let query = FlightQuery::new("Mumbai", "Goa").on("Jan 10");
        assert!(search_flights(&catalog(), &query).unwrap_err().is_invalid_argument());
    }

    #[rstest]
    #[case("price", FlightSort::Price)]
    #[case("Duration", FlightSort::Duration)]
    fn test_sort_key_parsing(#[case] raw: &str, #[case] expected: FlightSort) {
        assert_eq!(raw.parse::<FlightSort>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_sort_key_rejected() {
        let err = "stars".parse::<FlightSort>().unwrap_err();
        assert!(err.to_string().contains("Expected 'price' or 'duration'"));
    }
}
