//! Hotel search

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::{optional, required};
use crate::models::{Hotel, normalize};
use crate::{Result, TravelPlannerError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelSort {
    /// Cheapest night first
    #[default]
    Price,
    /// Most stars first
    Stars,
}

impl FromStr for HotelSort {
    type Err = TravelPlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(HotelSort::Price),
            "stars" => Ok(HotelSort::Stars),
            other => Err(TravelPlannerError::validation(format!(
                "Invalid sort_by value: {other}. Expected 'price' or 'stars'."
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelQuery {
    pub city: String,
    /// Case-insensitive substring of the hotel name
    #[serde(default)]
    pub name: Option<String>,
    /// Exact star rating
    #[serde(default)]
    pub stars: Option<u8>,
    #[serde(default)]
    pub sort: HotelSort,
}

impl HotelQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_stars(mut self, stars: u8) -> Self {
        self.stars = Some(stars);
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, sort: HotelSort) -> Self {
        self.sort = sort;
        self
    }
}

pub fn search_hotels(hotels: &[Hotel], query: &HotelQuery) -> Result<Vec<Hotel>> {
    let city = required("city", &query.city)?;
    let name = optional(query.name.as_deref());

    let mut results: Vec<Hotel> = hotels
        .iter()
        .filter(|h| normalize(&h.city) == city)
        .filter(|h| name.as_deref().is_none_or(|n| normalize(&h.name).contains(n)))
        .filter(|h| query.stars.is_none_or(|s| h.stars == s))
        .cloned()
        .collect();

    // both sorts are stable: equal keys keep catalog order
    match query.sort {
        HotelSort::Price => results.sort_by_key(|h| h.price_per_night),
        HotelSort::Stars => results.sort_by(|a, b| b.stars.cmp(&a.stars)),
    }

    debug!("Hotel search in {city} matched {}", results.len());
    Ok(results)
}
