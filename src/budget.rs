//! Budget estimation for flights, stays and full trips
//!
//! All estimators are pure. A stay of N days books N-1 nights, but at least
//! one night is always charged. Hotel-based budgets add a flat daily
//! allowance for incidental spending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Flight, Hotel, format_amount};
use crate::{Result, TravelPlannerError};

/// Flat per-day allowance added to hotel-based budgets
pub const MISC_DAILY_ALLOWANCE: u64 = 1500;

/// Labeled cost breakdown; only the categories that apply are present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misc_cost: Option<u64>,
    pub total_budget: u64,
}

impl BudgetBreakdown {
    /// `(field_name, amount)` pairs in display order, total last
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        [
            ("flight_cost", self.flight_cost),
            ("hotel_cost", self.hotel_cost),
            ("misc_cost", self.misc_cost),
            ("total_budget", Some(self.total_budget)),
        ]
        .into_iter()
        .filter_map(|(label, amount)| amount.map(|a| (label, a)))
        .collect()
    }

    /// Display lines such as `Hotel Cost: ₹4000`
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(label, amount)| format!("{}: {}", title_case(label), format_amount(amount)))
            .collect()
    }
}

/// `total_budget` -> `Total Budget`
fn title_case(label: &str) -> String {
    label
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Nights charged for a stay of `days` days
#[must_use]
pub fn nights_for(days: u32) -> u64 {
    u64::from(days.saturating_sub(1)).max(1)
}

fn stay_costs(hotel: &Hotel, days: u32) -> (u64, u64) {
    let hotel_cost = hotel.price_per_night * nights_for(days);
    let misc_cost = MISC_DAILY_ALLOWANCE * u64::from(days);
    (hotel_cost, misc_cost)
}

/// Budget when only a flight is booked
#[must_use]
pub fn estimate_flight_budget(flight: &Flight) -> BudgetBreakdown {
    BudgetBreakdown {
        flight_cost: Some(flight.price),
        hotel_cost: None,
        misc_cost: None,
        total_budget: flight.price,
    }
}

/// Budget when only a hotel is booked
#[must_use]
pub fn estimate_hotel_budget(hotel: &Hotel, days: u32) -> BudgetBreakdown {
    let (hotel_cost, misc_cost) = stay_costs(hotel, days);
    BudgetBreakdown {
        flight_cost: None,
        hotel_cost: Some(hotel_cost),
        misc_cost: Some(misc_cost),
        total_budget: hotel_cost + misc_cost,
    }
}

/// Budget for a flight plus a hotel stay
#[must_use]
pub fn estimate_full_trip_budget(flight: &Flight, hotel: &Hotel, days: u32) -> BudgetBreakdown {
    let (hotel_cost, misc_cost) = stay_costs(hotel, days);
    BudgetBreakdown {
        flight_cost: Some(flight.price),
        hotel_cost: Some(hotel_cost),
        misc_cost: Some(misc_cost),
        total_budget: flight.price + hotel_cost + misc_cost,
    }
}

/// Inclusive day count and night count between two dates
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Result<(u32, u32)> {
    if start > end {
        return Err(TravelPlannerError::validation(
            "Starting date cannot be after end date.",
        ));
    }
    let days = u32::try_from((end - start).num_days() + 1)
        .map_err(|_| TravelPlannerError::validation("Date range is too long"))?;
    Ok((days, days - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hotel(price_per_night: u64) -> Hotel {
        Hotel {
            name: "Sea Breeze".to_string(),
            city: "Goa".to_string(),
            stars: 3,
            price_per_night,
            amenities: Vec::new(),
        }
    }

    fn flight(price: u64) -> Flight {
        Flight {
            airline: "IndiGo".to_string(),
            origin: "Mumbai".to_string(),
            destination: "Goa".to_string(),
            price,
            departure_time: "2025-01-10T06:00:00".to_string(),
            arrival_time: "2025-01-10T07:30:00".to_string(),
        }
    }

    #[test]
    fn test_hotel_budget_three_days() {
        let budget = estimate_hotel_budget(&hotel(2000), 3);
        assert_eq!(budget.hotel_cost, Some(4000));
        assert_eq!(budget.misc_cost, Some(4500));
        assert_eq!(budget.total_budget, 8500);
        assert_eq!(budget.flight_cost, None);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 2)]
    #[case(10, 9)]
    fn test_nights_for(#[case] days: u32, #[case] nights: u64) {
        assert_eq!(nights_for(days), nights);
    }

    #[test]
    fn test_single_day_still_charges_a_night() {
        let budget = estimate_hotel_budget(&hotel(2000), 1);
        assert_eq!(budget.hotel_cost, Some(2000));
        assert_eq!(budget.total_budget, 3500);
    }

    #[test]
    fn test_full_trip_budget() {
        let budget = estimate_full_trip_budget(&flight(3100), &hotel(2000), 3);
        assert_eq!(budget.flight_cost, Some(3100));
        assert_eq!(budget.total_budget, 3100 + 4000 + 4500);
        assert_eq!(budget, estimate_full_trip_budget(&flight(3100), &hotel(2000), 3));
    }

    #[test]
    fn test_flight_budget() {
        let budget = estimate_flight_budget(&flight(3100));
        assert_eq!(budget.entries(), vec![("flight_cost", 3100), ("total_budget", 3100)]);
    }

    #[test]
    fn test_lines_are_labeled_with_currency() {
        let budget = estimate_hotel_budget(&hotel(2000), 3);
        assert_eq!(
            budget.lines(),
            vec!["Hotel Cost: ₹4000", "Misc Cost: ₹4500", "Total Budget: ₹8500"]
        );
    }

    #[test]
    fn test_serialization_skips_absent_categories() {
        let json = serde_json::to_value(estimate_flight_budget(&flight(3100))).unwrap();
        assert_eq!(json, serde_json::json!({"flight_cost": 3100, "total_budget": 3100}));
    }

    #[test]
    fn test_days_between() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        assert_eq!(days_between(start, end).unwrap(), (3, 2));
        assert_eq!(days_between(start, start).unwrap(), (1, 0));
        assert!(days_between(end, start).unwrap_err().is_invalid_argument());
    }
}
