//! Error types and handling for the trip planner

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum TravelPlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors (empty fields, unknown sort keys, bad dates)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A catalog file is absent; there is no degraded mode
    #[error("Catalog not found at {}", path.display())]
    CatalogNotFound { path: PathBuf },

    /// A catalog file exists but does not match the record schema
    #[error("Malformed catalog {}: {message}", path.display())]
    Catalog { path: PathBuf, message: String },

    /// Unknown planning session
    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelPlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Catalog {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by caller-controlled input
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelPlannerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TravelPlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelPlannerError::CatalogNotFound { path } => {
                format!("Travel data is missing ({}). We are sorry for the inconvenience.", path.display())
            }
            TravelPlannerError::Catalog { .. } => {
                "Travel data could not be read. Please check the catalog files.".to_string()
            }
            TravelPlannerError::SessionNotFound { .. } => {
                "Your planning session has expired or does not exist. Please start again.".to_string()
            }
            TravelPlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TravelPlannerError::config("bad port");
        assert!(matches!(config_err, TravelPlannerError::Config { .. }));

        let validation_err = TravelPlannerError::validation("city is required");
        assert!(validation_err.is_invalid_argument());

        let catalog_err = TravelPlannerError::catalog("data/hotels.json", "expected array");
        assert!(matches!(catalog_err, TravelPlannerError::Catalog { .. }));
        assert!(!catalog_err.is_invalid_argument());
    }

    #[test]
    fn test_user_messages() {
        let validation_err = TravelPlannerError::validation("city is required");
        assert!(validation_err.user_message().contains("city is required"));

        let missing = TravelPlannerError::CatalogNotFound {
            path: PathBuf::from("data/flights.json"),
        };
        assert!(missing.user_message().contains("data/flights.json"));
        assert!(missing.to_string().contains("Catalog not found"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TravelPlannerError = io_err.into();
        assert!(matches!(err, TravelPlannerError::Io { .. }));
    }
}
