//! Aggregation errors.

use macrolens_fetch::{FailureKind, FetchError};
use macrolens_types::{MacrolensError, TableError};
use thiserror::Error;

/// A requested series that could not be obtained.
#[derive(Debug)]
pub struct SourceFailure {
    /// Requested column name.
    pub name: String,
    /// Identifier passed to the adapter.
    pub source_id: String,
    /// What went wrong.
    pub error: FetchError,
}

impl SourceFailure {
    /// Returns the coarse failure kind.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.source_id, self.error)
    }
}

/// Errors that fail an aggregation as a whole.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Every adapter failed, or no row survived alignment.
    #[error("No data available: {} of {requested} series failed", failures.len())]
    NoDataAvailable {
        /// Number of series requested.
        requested: usize,
        /// Failures recorded along the way.
        failures: Vec<SourceFailure>,
    },

    /// The anchor series of the calendar was not fetched.
    #[error("Calendar anchor {0} is not among the fetched time series")]
    AnchorUnavailable(String),

    /// Two requests share a column name, or a value was NaN.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl From<AggregateError> for MacrolensError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::Table(e) => Self::Table(e),
            other @ AggregateError::NoDataAvailable { .. } => Self::NoDataAvailable {
                context: other.to_string(),
            },
            AggregateError::AnchorUnavailable(name) => Self::NoDataAvailable {
                context: format!("calendar anchor {name}"),
            },
        }
    }
}
