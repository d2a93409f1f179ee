//! `TravelPlanner` - rule-based trip planning assistant
//!
//! This library searches static catalogs of flights, hotels and places,
//! composes a simple day-by-day itinerary, fetches a short-range weather
//! forecast and estimates a trip budget.

pub mod api;
pub mod budget;
pub mod catalog;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod logging;
pub mod models;
pub mod planner;
pub mod search;
pub mod session;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use catalog::Catalog;
pub use config::TravelPlannerConfig;
pub use error::TravelPlannerError;
pub use models::{Flight, ForecastDay, Hotel, Place};
pub use planner::{FlightSearch, Planner, StayPlan, TripPlan};
pub use session::{PlannerMode, SessionState, SessionStore};
pub use weather::{Forecast, ForecastProvider, WeatherClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelPlannerError>;
