//! Error types for the price tracker

use thiserror::Error;

/// Errors that can occur when reading from the price endpoint
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Outcome of a failed refresh cycle
///
/// Both variants are handled the same way by the controller; they only differ
/// in what gets logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    /// Endpoint responded with an explicit error payload
    #[error("Price data unavailable: {0}")]
    DataUnavailable(String),

    /// Request could not complete or the response could not be decoded
    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl RefreshError {
    /// Creates a DataUnavailable error
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    /// Creates a TransportFailure error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportFailure(msg.into())
    }
}

impl From<SourceError> for RefreshError {
    fn from(err: SourceError) -> Self {
        Self::TransportFailure(err.to_string())
    }
}

/// Errors raised while building a `TrackerConfig`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
