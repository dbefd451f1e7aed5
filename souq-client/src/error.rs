//! Client error types

use shared::envelope::EnvelopeError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never completed (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; message prefers the server-provided one
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Resource not found (404), split out so callers can treat
    /// delete-after-delete as already-deleted
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client-side pre-flight check failed; never reached the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body did not match the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Payload did not decode into the expected type
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session persistence failed
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Malformed(msg) => ClientError::InvalidResponse(msg),
            EnvelopeError::Decode(err) => ClientError::Serialization(err),
        }
    }
}

impl ClientError {
    /// Human-readable message for surfacing in a notification.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
