//! JSON endpoints for interactive planning sessions

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    TravelPlannerError,
    budget::BudgetBreakdown,
    config::ServerConfig,
    itinerary::Itinerary,
    models::{Flight, Hotel, Place},
    planner::{Planner, StayPlan, TripPlan},
    search::{FlightQuery, HotelQuery, PlaceQuery, parse_date},
    session::{PlannerMode, SessionState, SessionStore},
    weather::Forecast,
};

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(planner: Planner) -> Self {
        Self::with_sessions(planner, SessionStore::new())
    }

    /// State whose session limits come from the server settings
    pub fn from_config(planner: Planner, config: &ServerConfig) -> Self {
        let sessions = SessionStore::with_limits(
            Duration::from_secs(config.session_ttl_seconds),
            config.max_sessions,
        );
        Self::with_sessions(planner, sessions)
    }

    pub fn with_sessions(planner: Planner, sessions: SessionStore) -> Self {
        Self {
            planner: Arc::new(planner),
            sessions: Arc::new(sessions),
        }
    }
}

/// Error body `{ "error": ... }` with a status derived from the error kind
pub struct ApiError(TravelPlannerError);

impl From<TravelPlannerError> for ApiError {
    fn from(err: TravelPlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TravelPlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
            TravelPlannerError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

#[derive(Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

#[derive(Deserialize)]
pub struct FlightSearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: Option<String>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct FlightSearchResponse {
    pub flights: Vec<Flight>,
    pub alternate_dates: bool,
    pub message: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct ChoiceRequest {
    pub choice: usize,
}

#[derive(Serialize)]
pub struct FlightConfirmed {
    pub flight: Flight,
    pub budget: BudgetBreakdown,
}

#[derive(Deserialize)]
pub struct HotelSearchRequest {
    pub city: Option<String>,
    pub name: Option<String>,
    pub stars: Option<u8>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct HotelSearchResponse {
    pub hotels: Vec<Hotel>,
    pub message: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct PlaceSearchRequest {
    pub city: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct PlaceSearchResponse {
    pub places: Vec<Place>,
    pub message: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct DaysRequest {
    pub days: u32,
}

#[derive(Deserialize)]
pub struct StayRequest {
    pub days: u32,
    #[serde(default)]
    pub itinerary: bool,
}

#[derive(Deserialize)]
pub struct WeatherParams {
    pub city: String,
    pub start: String,
    pub end: String,
}

const NO_HOTELS_MESSAGE: &str =
    "No hotels available for this city. We are sorry for the inconvenience.";
const NO_PLACES_MESSAGE: &str = "Currently not showing tourist attraction spots for this city. We are sorry for the inconvenience.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/mode", put(set_mode))
        .route("/sessions/{id}/flights/search", post(search_flights))
        .route("/sessions/{id}/flights/confirm", post(confirm_flight))
        .route("/sessions/{id}/hotels/search", post(search_hotels))
        .route("/sessions/{id}/hotels/confirm", post(confirm_hotel))
        .route("/sessions/{id}/places/search", post(search_places))
        .route("/sessions/{id}/trip", post(plan_trip))
        .route("/sessions/{id}/stay", post(plan_stay))
        .route("/sessions/{id}/itinerary", post(explore_itinerary))
        .route("/weather", get(get_weather))
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let session_id = state.sessions.create();
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

async fn get_session(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<SessionState> {
    Ok(Json(state.sessions.snapshot(&id)?))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_mode(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ModeRequest>,
) -> ApiResult<SessionState> {
    let mode: PlannerMode = payload.mode.parse()?;
    let session = state.sessions.with(&id, |session| {
        session.set_mode(mode);
        Ok(session.clone())
    })?;
    Ok(Json(session))
}

async fn search_flights(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FlightSearchRequest>,
) -> ApiResult<FlightSearchResponse> {
    state.sessions.snapshot(&id)?;

    let mut query = FlightQuery::new(&payload.origin, &payload.destination);
    query.date = payload.date;
    if let Some(sort) = payload.sort {
        query.sort = sort.parse()?;
    }
    let result = state.planner.find_flights(&query)?;
    let message = result.message();

    state.sessions.with(&id, |session| {
        session.set_flight_results(&payload.destination, result.flights.clone());
        Ok(())
    })?;

    Ok(Json(FlightSearchResponse {
        flights: result.flights,
        alternate_dates: result.alternate_dates,
        message,
    }))
}

async fn confirm_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChoiceRequest>,
) -> ApiResult<FlightConfirmed> {
    let flight = state
        .sessions
        .with(&id, |session| session.confirm_flight(payload.choice).cloned())?;
    let budget = state.planner.flight_budget(&flight);
    Ok(Json(FlightConfirmed { flight, budget }))
}

async fn search_hotels(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<HotelSearchRequest>,
) -> ApiResult<HotelSearchResponse> {
    let session = state.sessions.snapshot(&id)?;
    let city = payload
        .city
        .filter(|c| !c.trim().is_empty())
        .or_else(|| match session.mode {
            PlannerMode::FullTrip => session.destination.clone(),
            _ => None,
        })
        .unwrap_or_default();

    let mut query = HotelQuery::new(&city);
    query.name = payload.name;
    query.stars = payload.stars;
    if let Some(sort) = payload.sort {
        query.sort = sort.parse()?;
    }
    let hotels = state.planner.search_hotels(&query)?;

    state.sessions.with(&id, |session| {
        session.set_hotel_results(&city, hotels.clone());
        Ok(())
    })?;

    let message = hotels.is_empty().then_some(NO_HOTELS_MESSAGE);
    Ok(Json(HotelSearchResponse { hotels, message }))
}

async fn confirm_hotel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChoiceRequest>,
) -> ApiResult<Hotel> {
    let hotel = state
        .sessions
        .with(&id, |session| session.confirm_hotel(payload.choice).cloned())?;
    Ok(Json(hotel))
}

async fn search_places(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PlaceSearchRequest>,
) -> ApiResult<PlaceSearchResponse> {
    state.sessions.snapshot(&id)?;

    let mut query = PlaceQuery::new(payload.city);
    query.kind = payload.kind;
    query.name = payload.name;
    if let Some(sort) = payload.sort {
        query.sort = sort.parse()?;
    }
    let places = state.planner.search_places(&query)?;

    state.sessions.with(&id, |session| {
        session.set_place_results(places.clone());
        Ok(())
    })?;

    let message = places.is_empty().then_some(NO_PLACES_MESSAGE);
    Ok(Json(PlaceSearchResponse { places, message }))
}

async fn plan_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DaysRequest>,
) -> ApiResult<TripPlan> {
    let session = state.sessions.with(&id, |session| {
        session.set_days(payload.days)?;
        Ok(session.clone())
    })?;
    let plan = state.planner.plan_trip(&session, payload.days).await?;
    Ok(Json(plan))
}

async fn plan_stay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StayRequest>,
) -> ApiResult<StayPlan> {
    let session = state.sessions.with(&id, |session| {
        session.set_days(payload.days)?;
        Ok(session.clone())
    })?;
    let plan = state
        .planner
        .plan_stay(&session, payload.days, payload.itinerary)?;
    Ok(Json(plan))
}

async fn explore_itinerary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DaysRequest>,
) -> ApiResult<Itinerary> {
    let session = state.sessions.snapshot(&id)?;
    Ok(Json(state.planner.explore_itinerary(&session, payload.days)?))
}

async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> ApiResult<Forecast> {
    let start = parse_date(&params.start)?;
    let end = parse_date(&params.end)?;
    Ok(Json(state.planner.forecast(&params.city, start, end).await?))
}
