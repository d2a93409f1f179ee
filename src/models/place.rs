//! Point-of-interest catalog record

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub city: String,
    /// Category label such as "museum" or "beach"
    #[serde(rename = "type")]
    pub kind: String,
    /// Higher is better
    pub rating: f32,
}

impl Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {} | {}★", self.name, self.city, self.kind, self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_rename() {
        let json = r#"{"name":"Victoria Memorial","city":"Kolkata","type":"monument","rating":4.7}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.kind, "monument");
        assert_eq!(place.to_string(), "Victoria Memorial | Kolkata | monument | 4.7★");
    }
}
