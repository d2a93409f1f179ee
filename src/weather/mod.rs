//! Weather client for the `OpenMeteo` daily forecast
//!
//! Requests are limited to a fixed table of supported cities and to the
//! provider's forecast horizon. Anything that goes wrong on the wire is
//! reported as [`Forecast::Unavailable`]; only caller input errors are `Err`.

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{ForecastDay, normalize};
use crate::{Result, TravelPlannerError};

pub mod open_meteo;

/// Days ahead of today the provider serves forecasts for
pub const FORECAST_HORIZON_DAYS: u64 = 16;

/// Supported cities and their coordinates
const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("delhi", 28.6139, 77.2090),
    ("mumbai", 19.0760, 72.8777),
    ("kolkata", 22.5726, 88.3639),
    ("chennai", 13.0827, 80.2707),
    ("bangalore", 12.9716, 77.5946),
    ("hyderabad", 17.3850, 78.4867),
    ("goa", 15.2993, 74.1240),
    ("jaipur", 26.9124, 75.7873),
];

/// Latitude and longitude for a supported city
#[must_use]
pub fn city_coordinates(city: &str) -> Option<(f64, f64)> {
    let city = normalize(city);
    CITY_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == city)
        .map(|&(_, lat, lon)| (lat, lon))
}

/// Result of a forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Forecast {
    /// Provider answered; may be empty
    Available(Vec<ForecastDay>),
    /// No data could be obtained
    Unavailable(UnavailableReason),
}

impl Forecast {
    #[must_use]
    pub fn days(&self) -> Option<&[ForecastDay]> {
        match self {
            Forecast::Available(days) => Some(days),
            Forecast::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Forecast::Available(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Start date lies past the forecast horizon; no request was made
    BeyondHorizon,
    /// Transport failure or timeout
    Network,
    /// Non-success HTTP status
    HttpStatus(u16),
    /// Body did not have the expected shape
    MalformedResponse,
    /// City has no coordinates in the supported table
    Unsupported,
}

/// Date range actually requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ForecastWindow {
    /// Fit a requested range to the provider's rules.
    ///
    /// `None` when `start` is past the horizon. A degenerate or inverted range
    /// becomes one day long, and `end` is clamped to the horizon.
    #[must_use]
    pub fn clamp(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Option<Self> {
        let horizon = today.checked_add_days(Days::new(FORECAST_HORIZON_DAYS))?;
        if start > horizon {
            return None;
        }

        let mut end = end;
        if end <= start {
            end = start.checked_add_days(Days::new(1))?;
        }
        if end > horizon {
            end = horizon;
        }
        Some(Self { start, end })
    }
}

/// Source of daily forecasts
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Daily maxima for `city` between `start` and `end`
    async fn forecast(&self, city: &str, start: NaiveDate, end: NaiveDate) -> Result<Forecast>;
}

/// HTTP client for the `OpenMeteo` forecast endpoint
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TravelPlanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TravelPlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forecast relative to an explicit `today`
    #[instrument(skip(self))]
    pub async fn forecast_from(
        &self,
        city: &str,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<Forecast> {
        let city = normalize(city);

        let Some(window) = ForecastWindow::clamp(start, end, today) else {
            info!("Start date {start} is beyond the {FORECAST_HORIZON_DAYS}-day forecast horizon");
            return Ok(Forecast::Unavailable(UnavailableReason::BeyondHorizon));
        };

        if window.start > window.end {
            return Err(TravelPlannerError::validation(
                "Starting date cannot be after ending date",
            ));
        }

        if city.is_empty() {
            return Err(TravelPlannerError::validation("city is required"));
        }
        let (latitude, longitude) = city_coordinates(&city).ok_or_else(|| {
            TravelPlannerError::validation(format!("Weather data not supported for {city}"))
        })?;

        Ok(self.request(latitude, longitude, window).await)
    }

    async fn request(&self, latitude: f64, longitude: f64, window: ForecastWindow) -> Forecast {
        let url = format!("{}/forecast", self.base_url);
        let start_date = window.start.to_string();
        let end_date = window.end.to_string();
        debug!("OpenMeteo request {url} ({latitude}, {longitude}) {start_date}..{end_date}");

        let response = match self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", "temperature_2m_max".to_string()),
                ("start_date", start_date),
                ("end_date", end_date),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Weather request failed: {e}");
                return Forecast::Unavailable(UnavailableReason::Network);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Weather provider answered {status}");
            return Forecast::Unavailable(UnavailableReason::HttpStatus(status.as_u16()));
        }

        let days = match response.json::<open_meteo::ForecastResponse>().await {
            Ok(body) => body.into_days(),
            Err(e) => {
                warn!("Failed to parse OpenMeteo forecast response: {e}");
                None
            }
        };

        match days {
            Some(days) => {
                info!("Retrieved {} forecast days", days.len());
                Forecast::Available(days)
            }
            None => Forecast::Unavailable(UnavailableReason::MalformedResponse),
        }
    }
}

#[async_trait]
impl ForecastProvider for WeatherClient {
    async fn forecast(&self, city: &str, start: NaiveDate, end: NaiveDate) -> Result<Forecast> {
        self.forecast_from(city, start, end, Local::now().date_naive()).await
    }
}
