//! Error types for the Dog API client.
//!
//! # Design
//! Every failure the repository can see collapses into `ApiError`. Screens
//! never branch on the variant; they only need `ApiError::message`, the
//! short description that travels up inside `FetchResult::Failure`. The
//! variants exist for logs, for the FFI error codes, and for tests.

use thiserror::Error;

/// Failure that produced no HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Io(String),
}

/// Errors returned by `DogApiClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// The request never got a response.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body was not the expected JSON shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The configured base URL cannot carry path segments.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// The description a failed fetch reports: the status text for HTTP
    /// errors, the underlying failure text otherwise. `None` when the HTTP
    /// layer gave nothing to say.
    pub fn message(&self) -> Option<String> {
        let text = match self {
            ApiError::Status { reason, .. } => reason.clone(),
            ApiError::Transport(e) => e.to_string(),
            ApiError::Deserialization(msg) | ApiError::InvalidBaseUrl(msg) => msg.clone(),
        };
        (!text.is_empty()).then_some(text)
    }
}
