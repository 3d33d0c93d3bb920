//! Adapter failure types.

use macrolens_types::MacrolensError;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification of an adapter failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Transport, HTTP status or timeout failure.
    Network,
    /// Payload shape was not what the adapter expects.
    Parse,
    /// The call succeeded but carried no usable data.
    EmptyResult,
}

impl FailureKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parse => "parse",
            Self::EmptyResult => "empty",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while fetching a single series.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status.
    #[error("Server returned {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The call did not finish within the caller's timeout.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Payload did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// CSV payload could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// JSON payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The call succeeded but carried no usable data.
    #[error("Empty result: {0}")]
    Empty(String),

    /// Identifier is malformed for this adapter.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl FetchError {
    /// Returns the coarse failure kind.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Http(_) | Self::Status { .. } | Self::Timeout(_) => FailureKind::Network,
            Self::Parse(_) | Self::Csv(_) | Self::Json(_) | Self::InvalidIdentifier(_) => {
                FailureKind::Parse
            }
            Self::Empty(_) => FailureKind::EmptyResult,
        }
    }
}

impl From<FetchError> for MacrolensError {
    fn from(err: FetchError) -> Self {
        match err.kind() {
            FailureKind::Network => Self::Network(err.to_string()),
            FailureKind::Parse => Self::Parse(err.to_string()),
            FailureKind::EmptyResult => Self::EmptyResult(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            FetchError::Timeout(Duration::from_secs(5)).kind(),
            FailureKind::Network
        );
        assert_eq!(FetchError::Parse("x".into()).kind(), FailureKind::Parse);
        assert_eq!(FetchError::Empty("x".into()).kind(), FailureKind::EmptyResult);
    }

    #[test]
    fn test_into_macrolens_error() {
        let err: MacrolensError = FetchError::Status {
            status: 503,
            url: "https://example.com".into(),
        }
        .into();
        assert!(matches!(err, MacrolensError::Network(_)));
    }
}
