//! Itinerary composition
//!
//! Places are split into fixed, contiguous day buckets of
//! `max(1, places / days)` each. Places left over after the last bucket are
//! dropped, and only the first [`MAX_ITINERARY_DAYS`] days are populated; the
//! quota is always derived from the requested day count.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::models::Place;
use crate::{Result, TravelPlannerError};

/// Longest itinerary that gets generated
pub const MAX_ITINERARY_DAYS: u32 = 5;

/// Shown when the requested trip is longer than [`MAX_ITINERARY_DAYS`]
pub const TRUNCATION_NOTICE: &str = "Currently unable to provide itinerary for more than 5 days";

/// One day of the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    /// Place names for the day, in input order
    pub places: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub requested_days: u32,
    pub days: Vec<DayPlan>,
    /// The trip was longer than the itinerary cap
    pub truncated: bool,
}

impl Itinerary {
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        self.truncated.then_some(TRUNCATION_NOTICE)
    }
}

impl Display for Itinerary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(notice) = self.notice() {
            writeln!(f, "{notice}")?;
            writeln!(
                f,
                "So here is an itinerary for the first {MAX_ITINERARY_DAYS} days of your trip. Sorry for the inconvenience:"
            )?;
        }
        for day in &self.days {
            writeln!(f, "Day {}", day.day)?;
            for place in &day.places {
                writeln!(f, "- {place}")?;
            }
        }
        Ok(())
    }
}

/// Spread `places` over `days` days
pub fn compose_itinerary(places: &[Place], days: u32) -> Result<Itinerary> {
    if days == 0 {
        return Err(TravelPlannerError::validation("days must be at least 1"));
    }

    let per_day = (places.len() / days as usize).max(1);
    let populated = days.min(MAX_ITINERARY_DAYS);

    let buckets = (0..populated)
        .map(|d| {
            let start = (d as usize * per_day).min(places.len());
            let end = (start + per_day).min(places.len());
            DayPlan {
                day: d + 1,
                places: places[start..end].iter().map(|p| p.name.clone()).collect(),
            }
        })
        .collect();

    Ok(Itinerary {
        requested_days: days,
        days: buckets,
        truncated: days > MAX_ITINERARY_DAYS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn places(n: usize) -> Vec<Place> {
        (0..n)
            .map(|i| Place {
                name: format!("P{i}"),
                city: "Goa".to_string(),
                kind: "beach".to_string(),
                rating: 4.0,
            })
            .collect()
    }

    fn names(itinerary: &Itinerary) -> Vec<Vec<&str>> {
        itinerary
            .days
            .iter()
            .map(|d| d.places.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_even_split() {
        let itinerary = compose_itinerary(&places(6), 3).unwrap();
        assert_eq!(
            names(&itinerary),
            vec![vec!["P0", "P1"], vec!["P2", "P3"], vec!["P4", "P5"]]
        );
        assert!(!itinerary.truncated);
    }

    #[test]
    fn test_remainder_is_dropped() {
        let itinerary = compose_itinerary(&places(7), 3).unwrap();
        assert_eq!(
            names(&itinerary),
            vec![vec!["P0", "P1"], vec!["P2", "P3"], vec!["P4", "P5"]]
        );
    }

    #[test]
    fn test_fewer_places_than_days() {
        let itinerary = compose_itinerary(&places(2), 4).unwrap();
        assert_eq!(
            names(&itinerary),
            vec![vec!["P0"], vec!["P1"], vec![], vec![]]
        );
    }

    #[test]
    fn test_cap_uses_quota_from_requested_days() {
        // 14 places over 7 days -> 2 per day, only days 1..=5 populated
        let itinerary = compose_itinerary(&places(14), 7).unwrap();
        assert_eq!(itinerary.days.len(), 5);
        assert!(itinerary.days.iter().all(|d| d.places.len() == 2));
        assert_eq!(itinerary.days[4].places, vec!["P8", "P9"]);
        assert!(itinerary.truncated);
        assert_eq!(itinerary.notice(), Some(TRUNCATION_NOTICE));
    }

    #[rstest]
    #[case(10, 1)]
    #[case(10, 3)]
    #[case(3, 5)]
    #[case(20, 8)]
    #[case(0, 2)]
    fn test_bucket_invariants(#[case] n: usize, #[case] days: u32) {
        let itinerary = compose_itinerary(&places(n), days).unwrap();
        assert!(itinerary.days.len() <= days.min(MAX_ITINERARY_DAYS) as usize);

        let quota = (n / days as usize).max(1);
        assert!(itinerary.days.iter().all(|d| d.places.len() <= quota));

        let mut seen: Vec<&String> = itinerary.days.iter().flat_map(|d| &d.places).collect();
        let total = seen.len();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_zero_days_rejected() {
        assert!(compose_itinerary(&places(3), 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_display() {
        let text = compose_itinerary(&places(2), 2).unwrap().to_string();
        assert_eq!(text, "Day 1\n- P0\nDay 2\n- P1\n");
    }
}
