//! Place search

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::{optional, required};
use crate::models::{Place, normalize};
use crate::{Result, TravelPlannerError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceSort {
    /// Best rated first
    #[default]
    Rating,
    /// Alphabetical, ignoring case
    Name,
}

impl FromStr for PlaceSort {
    type Err = TravelPlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(PlaceSort::Rating),
            "name" => Ok(PlaceSort::Name),
            other => Err(TravelPlannerError::validation(format!(
                "Invalid sort_by value: {other}. Expected 'rating' or 'name'."
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceQuery {
    pub city: String,
    /// Exact category label
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Case-insensitive substring of the place name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sort: PlaceSort,
}

impl PlaceQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn of_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, sort: PlaceSort) -> Self {
        self.sort = sort;
        self
    }
}

pub fn search_places(places: &[Place], query: &PlaceQuery) -> Result<Vec<Place>> {
    let city = required("city", &query.city)?;
    let kind = optional(query.kind.as_deref());
    let name = optional(query.name.as_deref());

    let mut results: Vec<Place> = places
        .iter()
        .filter(|p| normalize(&p.city) == city)
        .filter(|p| name.as_deref().is_none_or(|n| normalize(&p.name).contains(n)))
        .filter(|p| kind.as_deref().is_none_or(|k| normalize(&p.kind) == k))
        .cloned()
        .collect();

    match query.sort {
        PlaceSort::Rating => results.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        PlaceSort::Name => results.sort_by_cached_key(|p| p.name.to_lowercase()),
    }

    debug!("Place search in {city} matched {}", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, kind: &str, rating: f32) -> Place {
        Place {
            name: name.to_string(),
            city: "Kolkata".to_string(),
            kind: kind.to_string(),
            rating,
        }
    }

    fn catalog() -> Vec<Place> {
        vec![
            place("Victoria Memorial", "monument", 4.7),
            place("howrah Bridge", "landmark", 4.6),
            place("Indian Museum", "museum", 4.4),
            place("Eco Park", "park", 4.6),
            place("Dakshineswar Temple", "temple", 4.8),
        ]
    }

    #[test]
    fn test_rating_sort_descending() {
        let results = search_places(&catalog(), &PlaceQuery::new("kolkata")).unwrap();
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Dakshineswar Temple",
                "Victoria Memorial",
                "howrah Bridge",
                "Eco Park",
                "Indian Museum"
            ]
        );
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let query = PlaceQuery::new("kolkata").sorted_by(PlaceSort::Name);
        let results = search_places(&catalog(), &query).unwrap();
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Dakshineswar Temple",
                "Eco Park",
                "howrah Bridge",
                "Indian Museum",
                "Victoria Memorial"
            ]
        );
    }

    #[test]
    fn test_sort_key_does_not_change_result_set() {
        // Eco Park and howrah Bridge tie on rating
        let names = |sort: PlaceSort| {
            let query = PlaceQuery::new("kolkata").sorted_by(sort);
            let mut names: Vec<String> = search_places(&catalog(), &query)
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect();
            names.sort();
            names
        };
        assert_eq!(names(PlaceSort::Rating), names(PlaceSort::Name));
        assert_eq!(names(PlaceSort::Rating).len(), 5);
    }

    #[test]
    fn test_type_and_name_filters() {
        let query = PlaceQuery::new("Kolkata").of_kind("Museum");
        let results = search_places(&catalog(), &query).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Indian Museum");

        let query = PlaceQuery::new("Kolkata").named("park");
        assert_eq!(search_places(&catalog(), &query).unwrap()[0].name, "Eco Park");
    }

    #[test]
    fn test_empty_city_rejected() {
        assert!(search_places(&catalog(), &PlaceQuery::new(" ")).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_unknown_sort_key_rejected() {
        assert!("price".parse::<PlaceSort>().is_err());
    }
}
