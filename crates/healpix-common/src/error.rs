//! Error types for healpix-view services.

use thiserror::Error;

/// Result type alias using ViewerError.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Primary error type for viewer operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    // === Map Errors ===
    #[error("Failed to read map: {0}")]
    MapReadError(String),

    #[error("Invalid map metadata: {0}")]
    InvalidMetadata(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ViewerError {
    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }

    /// Create a ConfigError.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

// Conversion from common error types
impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::MapReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::InvalidMetadata(format!("JSON error: {}", err))
    }
}
