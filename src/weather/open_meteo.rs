//! `OpenMeteo` daily forecast wire types

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::ForecastDay;

/// Forecast response from `OpenMeteo`, reduced to the fields we request
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub daily: Option<DailyData>,
}

/// Parallel daily arrays
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Option<Vec<String>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Option<f32>>>,
}

impl ForecastResponse {
    /// Zip dates with maxima positionally; the shorter array wins.
    /// Returns `None` when the body lacks the expected shape.
    #[must_use]
    pub fn into_days(self) -> Option<Vec<ForecastDay>> {
        let daily = self.daily?;
        let times = daily.time?;
        let temps = daily.temperature_max?;

        times
            .iter()
            .zip(temps)
            .map(|(time, max_temp)| {
                NaiveDate::parse_from_str(time, "%Y-%m-%d")
                    .ok()
                    .map(|date| ForecastDay { date, max_temp })
            })
            .collect()
    }
}
