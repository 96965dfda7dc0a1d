//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PulseArc
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PulseArcError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for PulseArc operations
pub type Result<T> = std::result::Result<T, PulseArcError>;

/// Errors a Collector's `collect()` call can fail the whole batch with.
///
/// Per-business failures are not represented here: they are logged and the
/// business is simply omitted from the result.
#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "message")]
pub enum CollectorError {
    /// Upstream API rejected our credentials (e.g. Yelp 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Upstream API rate-limited the whole batch (e.g. Yelp/Google 429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Fatal, whole-batch transport or configuration failure.
    #[error("collector failed: {0}")]
    Fatal(String),
}

/// Per-business outcome that a collector logs and skips rather than failing
/// the batch over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("business not found upstream: {0}")]
    BusinessNotFound(String),

    #[error("required metadata key missing: {0}")]
    MissingMetadata(String),

    #[error("invalid API response: {0}")]
    InvalidApiResponse(String),
}

impl From<CollectorError> for PulseArcError {
    fn from(err: CollectorError) -> Self {
        match err {
            CollectorError::Unauthorized(msg) => PulseArcError::Auth(msg),
            CollectorError::RateLimited(msg) => PulseArcError::Network(msg),
            CollectorError::Fatal(msg) => PulseArcError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_error_converts_to_pulsearc_error() {
        assert!(matches!(
            PulseArcError::from(CollectorError::Unauthorized("bad key".into())),
            PulseArcError::Auth(_)
        ));
        assert!(matches!(
            PulseArcError::from(CollectorError::RateLimited("slow down".into())),
            PulseArcError::Network(_)
        ));
    }
}
