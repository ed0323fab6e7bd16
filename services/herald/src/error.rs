//! Error types for the herald service

/// Errors that can occur in the herald service
#[derive(Debug, thiserror::Error)]
pub enum HeraldError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Missing field in API response: {0}")]
    MissingField(String),

    #[error("Unknown review status: {0}")]
    UnknownStatus(String),

    /// Expected outcome of a quiet poll window, not a failure.
    #[error("No review status updates")]
    NoUpdates,

    #[error("Message delivery failed: {0}")]
    Delivery(String),
}

/// Result type alias for herald operations
pub type Result<T> = std::result::Result<T, HeraldError>;
