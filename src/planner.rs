//! Trip planning orchestration
//!
//! Ties the catalogs, the weather provider, the budget estimator and the
//! itinerary composer together for the four planning modes. Catalogs are
//! read through on every search.

use chrono::Days;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::budget::{
    BudgetBreakdown, estimate_flight_budget, estimate_full_trip_budget, estimate_hotel_budget,
};
use crate::catalog::Catalog;
use crate::config::TravelPlannerConfig;
use crate::itinerary::{Itinerary, compose_itinerary};
use crate::models::{Flight, Hotel, Place};
use crate::search::{self, FlightQuery, HotelQuery, PlaceQuery, parse_date};
use crate::session::SessionState;
use crate::weather::{Forecast, ForecastProvider, UnavailableReason, WeatherClient};
use crate::{Result, TravelPlannerError};

pub const NO_FLIGHTS_MESSAGE: &str =
    "No flights available for this route. We are sorry for the inconvenience.";
pub const ALTERNATE_DATES_MESSAGE: &str = "No flights on selected date. Showing alternate dates.";

/// Flight results after the date fallback has been applied
#[derive(Debug, Clone, Serialize)]
pub struct FlightSearch {
    pub flights: Vec<Flight>,
    /// The requested date had no flights; these are for other dates
    pub alternate_dates: bool,
}

impl FlightSearch {
    /// User-facing note for empty or fallback results
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        if self.flights.is_empty() {
            Some(NO_FLIGHTS_MESSAGE)
        } else if self.alternate_dates {
            Some(ALTERNATE_DATES_MESSAGE)
        } else {
            None
        }
    }
}

/// Everything produced for a full trip
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub flight: Flight,
    pub hotel: Hotel,
    pub days: u32,
    pub itinerary: Itinerary,
    pub forecast: Forecast,
    pub budget: BudgetBreakdown,
}

/// Result of the staycation flow
#[derive(Debug, Clone, Serialize)]
pub struct StayPlan {
    pub hotel: Hotel,
    pub days: u32,
    pub itinerary: Option<Itinerary>,
    pub budget: BudgetBreakdown,
}

pub struct Planner {
    catalog: Catalog,
    weather: Box<dyn ForecastProvider>,
}

impl Planner {
    pub fn new(catalog: Catalog, weather: impl ForecastProvider + 'static) -> Self {
        Self {
            catalog,
            weather: Box::new(weather),
        }
    }

    pub fn from_config(config: &TravelPlannerConfig) -> Result<Self> {
        let catalog = Catalog::from_config(&config.catalog);
        let weather = WeatherClient::new(&config.weather)?;
        Ok(Self::new(catalog, weather))
    }

    pub fn search_flights(&self, query: &FlightQuery) -> Result<Vec<Flight>> {
        search::search_flights(&self.catalog.load_flights()?, query)
    }

    pub fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<Hotel>> {
        search::search_hotels(&self.catalog.load_hotels()?, query)
    }

    pub fn search_places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        search::search_places(&self.catalog.load_places()?, query)
    }

    /// Search flights; if a dated search finds nothing, retry once for any date
    #[instrument(skip(self))]
    pub fn find_flights(&self, query: &FlightQuery) -> Result<FlightSearch> {
        let flights = self.search_flights(query)?;
        let dated = query.date.as_deref().is_some_and(|d| !d.trim().is_empty());

        if !flights.is_empty() || !dated {
            info!("Found {} flights", flights.len());
            return Ok(FlightSearch {
                flights,
                alternate_dates: false,
            });
        }

        let flights = self.search_flights(&query.any_date())?;
        info!("No flights on requested date, {} on other dates", flights.len());
        Ok(FlightSearch {
            alternate_dates: !flights.is_empty(),
            flights,
        })
    }

    /// Forecast with provider validation errors kept as errors
    pub async fn forecast(
        &self,
        city: &str,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> Result<Forecast> {
        self.weather.forecast(city, start, end).await
    }

    /// Full trip: itinerary at the destination, weather from the departure
    /// date, and the combined budget
    #[instrument(skip(self, session))]
    pub async fn plan_trip(&self, session: &SessionState, days: u32) -> Result<TripPlan> {
        let flight = session
            .selected_flight
            .clone()
            .ok_or_else(|| TravelPlannerError::validation("Confirm a flight first"))?;
        let hotel = session
            .selected_hotel
            .clone()
            .ok_or_else(|| TravelPlannerError::validation("Confirm a hotel first"))?;
        let destination = session
            .destination
            .clone()
            .unwrap_or_else(|| flight.destination.clone());

        let places = self.search_places(&PlaceQuery::new(&destination))?;
        let itinerary = compose_itinerary(&places, days)?;

        let start = parse_date(flight.departure_date())?;
        let end = start
            .checked_add_days(Days::new(days.into()))
            .ok_or_else(|| TravelPlannerError::validation("Trip is too long"))?;
        let forecast = match self.weather.forecast(&destination, start, end).await {
            Ok(forecast) => forecast,
            Err(e) if e.is_invalid_argument() => {
                warn!("Weather not available for {destination}: {e}");
                Forecast::Unavailable(UnavailableReason::Unsupported)
            }
            Err(e) => return Err(e),
        };

        let budget = estimate_full_trip_budget(&flight, &hotel, days);
        info!(
            "Planned {days}-day trip to {destination}, total {}",
            budget.total_budget
        );

        Ok(TripPlan {
            flight,
            hotel,
            days,
            itinerary,
            forecast,
            budget,
        })
    }

    /// Staycation: hotel budget plus an optional itinerary in the hotel's city
    #[instrument(skip(self, session))]
    pub fn plan_stay(
        &self,
        session: &SessionState,
        days: u32,
        with_itinerary: bool,
    ) -> Result<StayPlan> {
        let hotel = session
            .selected_hotel
            .clone()
            .ok_or_else(|| TravelPlannerError::validation("Confirm a hotel first"))?;
        if days == 0 {
            return Err(TravelPlannerError::validation("days must be at least 1"));
        }

        let itinerary = if with_itinerary {
            let city = session.stay_city.clone().unwrap_or_else(|| hotel.city.clone());
            let places = self.search_places(&PlaceQuery::new(city))?;
            Some(compose_itinerary(&places, days)?)
        } else {
            None
        };

        let budget = estimate_hotel_budget(&hotel, days);
        Ok(StayPlan {
            hotel,
            days,
            itinerary,
            budget,
        })
    }

    /// Flights-only flow: the budget for the chosen flight
    #[must_use]
    pub fn flight_budget(&self, flight: &Flight) -> BudgetBreakdown {
        estimate_flight_budget(flight)
    }

    /// Explore-places flow: itinerary over the last place results
    pub fn explore_itinerary(&self, session: &SessionState, days: u32) -> Result<Itinerary> {
        let places = session
            .places
            .as_deref()
            .ok_or_else(|| TravelPlannerError::validation("Search for places first"))?;
        compose_itinerary(places, days)
    }
}
