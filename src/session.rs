//! Per-session planning state
//!
//! Holds the last search results for each catalog and the confirmed
//! selections. Re-running or confirming an upstream step clears everything
//! downstream of it so a new plan never picks up a stale hotel.

use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::models::{Flight, Hotel, Place};
use crate::{Result, TravelPlannerError};

/// The four planning modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerMode {
    /// Flights, then a hotel at the destination, then itinerary, weather and budget
    #[default]
    FullTrip,
    /// Flight search and flight budget
    FlightsOnly,
    /// Hotel search, optional itinerary and stay budget
    Staycation,
    /// Place search and optional itinerary
    ExplorePlaces,
}

impl Display for PlannerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlannerMode::FullTrip => "Plan a Full Trip",
            PlannerMode::FlightsOnly => "Only Flights",
            PlannerMode::Staycation => "Staycation and Hotels",
            PlannerMode::ExplorePlaces => "Explore Places in a City",
        };
        f.write_str(label)
    }
}

impl FromStr for PlannerMode {
    type Err = TravelPlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "full_trip" | "trip" => Ok(PlannerMode::FullTrip),
            "flights_only" | "flights" => Ok(PlannerMode::FlightsOnly),
            "staycation" | "hotels" => Ok(PlannerMode::Staycation),
            "explore_places" | "places" => Ok(PlannerMode::ExplorePlaces),
            other => Err(TravelPlannerError::validation(format!("Unknown mode '{other}'"))),
        }
    }
}

/// Ephemeral state for one planning session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: PlannerMode,
    /// City the flight search was for; hotels and places follow it
    pub destination: Option<String>,
    pub flights: Option<Vec<Flight>>,
    pub selected_flight: Option<Flight>,
    /// City the hotel search was for
    pub stay_city: Option<String>,
    pub hotels: Option<Vec<Hotel>>,
    pub selected_hotel: Option<Hotel>,
    pub places: Option<Vec<Place>>,
    pub days: Option<u32>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch mode. Results and selections are kept, as with a sidebar switch.
    pub fn set_mode(&mut self, mode: PlannerMode) {
        self.mode = mode;
    }

    /// Replace flight results; the flow restarts from flight selection
    pub fn set_flight_results(&mut self, destination: &str, flights: Vec<Flight>) {
        self.destination = Some(destination.trim().to_lowercase());
        self.flights = (!flights.is_empty()).then_some(flights);
        self.selected_flight = None;
        self.clear_stay();
    }

    /// Confirm the `choice`-th flight (1-based)
    pub fn confirm_flight(&mut self, choice: usize) -> Result<&Flight> {
        let flight = pick(self.flights.as_deref(), choice, "flight")?.clone();
        debug!("Confirmed flight {}", flight.airline);
        self.clear_stay();
        Ok(self.selected_flight.insert(flight))
    }

    /// Replace hotel results; any confirmed hotel is dropped
    pub fn set_hotel_results(&mut self, city: &str, hotels: Vec<Hotel>) {
        self.stay_city = Some(city.trim().to_lowercase());
        self.hotels = (!hotels.is_empty()).then_some(hotels);
        self.selected_hotel = None;
        self.days = None;
    }

    /// Confirm the `choice`-th hotel (1-based)
    pub fn confirm_hotel(&mut self, choice: usize) -> Result<&Hotel> {
        let hotel = pick(self.hotels.as_deref(), choice, "hotel")?.clone();
        debug!("Confirmed hotel {}", hotel.name);
        self.days = None;
        Ok(self.selected_hotel.insert(hotel))
    }

    pub fn set_place_results(&mut self, places: Vec<Place>) {
        self.places = (!places.is_empty()).then_some(places);
    }

    pub fn set_days(&mut self, days: u32) -> Result<()> {
        if days == 0 {
            return Err(TravelPlannerError::validation("days must be at least 1"));
        }
        self.days = Some(days);
        Ok(())
    }

    /// Start over with an empty state in the same mode
    pub fn reset(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::default()
        };
    }

    fn clear_stay(&mut self) {
        self.stay_city = None;
        self.hotels = None;
        self.selected_hotel = None;
        self.days = None;
    }
}

/// Numeric selection control: `choice` must lie in `1..=len`
fn pick<'a, T>(items: Option<&'a [T]>, choice: usize, what: &str) -> Result<&'a T> {
    let items = items
        .filter(|items| !items.is_empty())
        .ok_or_else(|| TravelPlannerError::validation(format!("No {what} results to choose from")))?;
    choice
        .checked_sub(1)
        .and_then(|index| items.get(index))
        .ok_or_else(|| {
            TravelPlannerError::validation(format!(
                "Choose a {what} between 1 and {}",
                items.len()
            ))
        })
}

/// Sessions idle for longer than this are dropped
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on live sessions; the least recently used one makes room
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct Entry {
    state: SessionState,
    touched: Instant,
    /// Monotonic use counter for least-recently-used eviction
    seq: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

impl Sessions {
    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Isolated sessions keyed by an opaque random id.
///
/// A session expires after `ttl` without use, and at most `max_sessions`
/// are held at once.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<Sessions>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Open a new empty session and return its id
    pub fn create(&self) -> String {
        let mut sessions = self.lock();
        self.evict_idle(&mut sessions);

        while sessions.entries.len() >= self.max_sessions {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.entries.remove(&id);
                    debug!("Evicted least recently used session {id}");
                }
                None => break,
            }
        }

        let id = loop {
            let candidate = format!("{:016x}", rand::rng().random::<u64>());
            if !sessions.entries.contains_key(&candidate) {
                break candidate;
            }
        };
        let seq = sessions.bump();
        sessions.entries.insert(
            id.clone(),
            Entry {
                state: SessionState::new(),
                touched: Instant::now(),
                seq,
            },
        );
        debug!("Opened session {id}");
        id
    }

    /// Run `f` against the session's state and mark the session as used
    pub fn with<R>(&self, id: &str, f: impl FnOnce(&mut SessionState) -> Result<R>) -> Result<R> {
        let mut sessions = self.lock();
        self.evict_idle(&mut sessions);

        let seq = sessions.bump();
        let entry = sessions
            .entries
            .get_mut(id)
            .ok_or_else(|| TravelPlannerError::SessionNotFound { id: id.to_string() })?;
        entry.touched = Instant::now();
        entry.seq = seq;
        f(&mut entry.state)
    }

    /// Copy of the session's state, for work that must not hold the lock
    pub fn snapshot(&self, id: &str) -> Result<SessionState> {
        self.with(id, |state| Ok(state.clone()))
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        self.lock()
            .entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TravelPlannerError::SessionNotFound { id: id.to_string() })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_idle(&self, sessions: &mut Sessions) {
        let before = sessions.entries.len();
        sessions
            .entries
            .retain(|_, entry| entry.touched.elapsed() < self.ttl);
        let evicted = before - sessions.entries.len();
        if evicted > 0 {
            debug!("Expired {evicted} idle sessions");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        // no invariant spans the lock, so a poisoned map is still usable
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
