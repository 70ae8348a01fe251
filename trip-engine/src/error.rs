//! Engine error types.

use std::fmt;

use crate::domain::{InvalidCoordinate, InvalidTransportMode};

/// Which route provider an upstream error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Car,
    Train,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Car => f.write_str("car"),
            Provider::Train => f.write_str("train"),
        }
    }
}

/// Errors that abort a trip aggregation.
///
/// Every variant fails the whole request; the engine never returns a
/// partial trip list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TripError {
    /// Network failure, timeout or non-success status from a backend
    #[error("{provider} provider unavailable: {message}")]
    UpstreamUnavailable { provider: Provider, message: String },

    /// Backend answered 429
    #[error("rate limited by {provider} provider")]
    RateLimited { provider: Provider },

    /// Backend response could not be parsed into the expected shape
    #[error("malformed {provider} provider response: {message}")]
    MalformedUpstreamResponse { provider: Provider, message: String },

    /// Unsupported transport mode, invalid coordinate or disallowed user id
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A place or settings collaborator failed
    #[error("source error: {0}")]
    Source(String),

    /// The caller cancelled the aggregation
    #[error("trip aggregation cancelled")]
    Cancelled,
}

impl TripError {
    pub(crate) fn upstream(provider: Provider, message: impl Into<String>) -> Self {
        TripError::UpstreamUnavailable {
            provider,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(provider: Provider, message: impl Into<String>) -> Self {
        TripError::MalformedUpstreamResponse {
            provider,
            message: message.into(),
        }
    }

    /// Convert a transport-level reqwest failure.
    pub(crate) fn from_reqwest(provider: Provider, err: &reqwest::Error) -> Self {
        if err.is_decode() {
            return TripError::malformed(provider, err.to_string());
        }
        if err.is_timeout() {
            return TripError::upstream(provider, format!("request timed out: {err}"));
        }
        TripError::upstream(provider, err.to_string())
    }

    /// Whether the error stems from the caller's input (4xx-class) rather
    /// than an upstream or internal failure (5xx-class).
    pub fn is_client_error(&self) -> bool {
        matches!(self, TripError::InvalidInput(_))
    }
}

impl From<InvalidCoordinate> for TripError {
    fn from(err: InvalidCoordinate) -> Self {
        TripError::InvalidInput(err.to_string())
    }
}

impl From<InvalidTransportMode> for TripError {
    fn from(err: InvalidTransportMode) -> Self {
        TripError::InvalidInput(err.to_string())
    }
}
