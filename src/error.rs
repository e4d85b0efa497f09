//! Error types and handling for the tourism data service

use thiserror::Error;

/// Main error type for the tourism data service
#[derive(Error, Debug)]
pub enum TourismError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Remote source retrieval errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// CSV, GeoJSON or value parsing errors
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The attraction table lacks required columns
    #[error("The data is missing expected columns: {missing:?}")]
    Schema { missing: Vec<String> },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl TourismError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for failures raised while loading the source tables
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Parse { .. } | Self::Schema { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            Self::Network { message } => format!("Data loading failed: {message}"),
            Self::Parse { message } => format!("Data loading failed: {message}"),
            Self::Schema { missing } => {
                format!("The data is missing expected columns: {missing:?}")
            }
            Self::Validation { message } => format!("Invalid input: {message}"),
        }
    }
}
