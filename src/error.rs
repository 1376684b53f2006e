//! Error types for news-digest
//!
//! Two layers of errors live here:
//! - [`Error`], the crate-wide error returned from fallible library calls
//!   (configuration, network exhaustion, serialization)
//! - [`NetworkError`], the cause of a single failed attempt against the upstream API
//!
//! The caller-facing taxonomy of a finished query is [`crate::types::ErrorKind`],
//! carried inside [`crate::types::RequestOutcome::Failure`].

use std::time::Duration;
use thiserror::Error;

/// Result type alias for news-digest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for news-digest
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "retry.max_attempts")
        key: Option<String>,
    },

    /// Upstream request failed on every attempt
    #[error("network error after {attempts} attempt(s): {source}")]
    Network {
        /// Number of attempts performed before giving up
        attempts: u32,
        /// Cause of the final failed attempt
        #[source]
        source: NetworkError,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Cause of one failed attempt against the upstream API
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection, TLS, or other transport-level failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success HTTP status
    #[error("upstream returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The attempt did not finish within the per-attempt timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream answered with a success status but the body was not JSON
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),
}

impl NetworkError {
    /// One-line description that leaves out the upstream response body
    ///
    /// Suitable for user-facing messages; the body of a [`NetworkError::Status`]
    /// can be an arbitrarily long error page.
    pub fn summary(&self) -> String {
        match self {
            NetworkError::Status { status, .. } => format!("upstream returned HTTP {status}"),
            other => other.to_string(),
        }
    }
}
