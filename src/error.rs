//! Error types for the Kashidashi client

use thiserror::Error;

/// Main client error type.
///
/// Every variant is recovered at the boundary where it occurs and surfaced to
/// the user as a single notification; none of them is fatal to the page.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unsupported capability: {0}")]
    Unsupported(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Device error: {0}")]
    Device(String),

    #[error("Detection error: {0}")]
    Detection(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ClientError {
    /// True for failures that happened on the wire or while reading the body.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Decode(_))
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
