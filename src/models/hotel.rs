//! Hotel catalog record

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A hotel with a flat nightly price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub city: String,
    /// Star rating, conventionally 1-5
    pub stars: u8,
    /// Price per night in rupees
    pub price_per_night: u64,
    /// Amenity labels; order is only used for display
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Display for Hotel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {}★ | {} | Amenities: {}",
            self.name,
            self.city,
            self.stars,
            super::format_amount(self.price_per_night),
            self.amenities.join(", ")
        )
    }
}
