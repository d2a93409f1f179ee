//! Daily forecast model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One forecast day. The provider may report a null maximum for a day it
/// lists; that day is kept with `max_temp: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Daily maximum temperature in Celsius
    pub max_temp: Option<f32>,
}

impl Display for ForecastDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max_temp {
            Some(temp) => write!(f, "{} → {temp}°C", self.date),
            None => write!(f, "{} → n/a", self.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 19).unwrap();
        let day = ForecastDay {
            date,
            max_temp: Some(31.4),
        };
        assert_eq!(day.to_string(), "2025-12-19 → 31.4°C");

        let missing = ForecastDay { date, max_temp: None };
        assert_eq!(missing.to_string(), "2025-12-19 → n/a");
    }
}
