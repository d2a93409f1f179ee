//! Catalog Loading Module
//!
//! Read-through access to the three static catalogs (flights, hotels, places).
//! Every search reloads its file from disk unless the optional in-memory cache
//! is enabled; the cache is keyed by file path and can be invalidated explicitly.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::models::{Flight, Hotel, Place};
use crate::{Result, TravelPlannerError};

/// The three catalogs and their file names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Flights,
    Hotels,
    Places,
}

impl CatalogKind {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            CatalogKind::Flights => "flights.json",
            CatalogKind::Hotels => "hotels.json",
            CatalogKind::Places => "places.json",
        }
    }
}

/// Loader for catalog files under one data directory
#[derive(Debug)]
pub struct Catalog {
    data_dir: PathBuf,
    cache: Option<Mutex<HashMap<PathBuf, Arc<str>>>>,
}

impl Catalog {
    /// Loader that re-reads files on every call
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: None,
        }
    }

    /// Loader that keeps file contents in memory until [`Catalog::invalidate`]
    pub fn with_cache(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: Some(Mutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        if config.cache_enabled {
            Self::with_cache(&config.data_dir)
        } else {
            Self::new(&config.data_dir)
        }
    }

    #[must_use]
    pub fn path_for(&self, kind: CatalogKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    pub fn load_flights(&self) -> Result<Vec<Flight>> {
        let flights: Vec<Flight> = self.load(CatalogKind::Flights)?;
        for flight in &flights {
            match flight.duration_seconds() {
                Ok(seconds) if seconds <= 0 => warn!(
                    "Flight {} {} -> {} arrives before it departs",
                    flight.airline, flight.origin, flight.destination
                ),
                Ok(_) => {}
                Err(e) => warn!("Flight {} has unreadable timestamps: {e}", flight.airline),
            }
        }
        Ok(flights)
    }

    pub fn load_hotels(&self) -> Result<Vec<Hotel>> {
        self.load(CatalogKind::Hotels)
    }

    pub fn load_places(&self) -> Result<Vec<Place>> {
        self.load(CatalogKind::Places)
    }

    /// Drop every cached file so the next load hits the disk
    pub fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            if let Ok(mut entries) = cache.lock() {
                entries.clear();
                info!("Catalog cache invalidated");
            }
        }
    }

    fn load<T: DeserializeOwned>(&self, kind: CatalogKind) -> Result<Vec<T>> {
        let path = self.path_for(kind);
        let contents = self.read(&path)?;
        let records: Vec<T> = serde_json::from_str(&contents)
            .map_err(|e| TravelPlannerError::catalog(&path, e.to_string()))?;
        debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    fn read(&self, path: &Path) -> Result<Arc<str>> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.lock().ok().and_then(|c| c.get(path).cloned()) {
                debug!("Catalog cache hit for {}", path.display());
                return Ok(hit);
            }
        }

        if !path.exists() {
            return Err(TravelPlannerError::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents: Arc<str> = std::fs::read_to_string(path)?.into();

        if let Some(cache) = &self.cache {
            if let Ok(mut entries) = cache.lock() {
                entries.insert(path.to_path_buf(), Arc::clone(&contents));
            }
        }
        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HOTELS: &str = r#"[
        {"name":"Sea Breeze","city":"Goa","stars":3,"price_per_night":2000,"amenities":["Pool"]}
    ]"#;

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(dir.path());
        let err = catalog.load_hotels().unwrap_err();
        match err {
            TravelPlannerError::CatalogNotFound { path } => {
                assert!(path.ends_with("hotels.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("places.json"), r#"{"not":"an array"}"#).unwrap();
        let err = Catalog::new(dir.path()).load_places().unwrap_err();
        assert!(matches!(err, TravelPlannerError::Catalog { .. }));
    }

    #[test]
    fn test_reloads_without_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotels.json");
        fs::write(&path, HOTELS).unwrap();
        let catalog = Catalog::new(dir.path());
        assert_eq!(catalog.load_hotels().unwrap().len(), 1);

        fs::write(&path, "[]").unwrap();
        assert!(catalog.load_hotels().unwrap().is_empty());
    }

    #[test]
    fn test_cache_serves_stale_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotels.json");
        fs::write(&path, HOTELS).unwrap();
        let catalog = Catalog::with_cache(dir.path());
        assert_eq!(catalog.load_hotels().unwrap().len(), 1);

        fs::write(&path, "[]").unwrap();
        assert_eq!(catalog.load_hotels().unwrap().len(), 1);

        catalog.invalidate();
        assert!(catalog.load_hotels().unwrap().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = CatalogConfig {
            data_dir: PathBuf::from("/tmp/catalogs"),
            cache_enabled: true,
        };
        let catalog = Catalog::from_config(&config);
        assert_eq!(
            catalog.path_for(CatalogKind::Flights),
            PathBuf::from("/tmp/catalogs/flights.json")
        );
        assert!(catalog.cache.is_some());
    }
}
