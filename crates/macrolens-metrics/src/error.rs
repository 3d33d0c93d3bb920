//! Metric errors.

use macrolens_types::{MacrolensError, TableError};
use thiserror::Error;

/// Errors raised while validating or evaluating metrics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// An input column is absent from the table at compute time.
    #[error("{metric}: missing dependency {column}")]
    MissingDependency {
        /// Metric being computed.
        metric: String,
        /// Absent column.
        column: String,
    },

    /// An input is neither a declared column nor an earlier metric.
    #[error("{metric}: input {column} is never produced")]
    UndeclaredInput {
        /// Metric being validated.
        metric: String,
        /// Offending input.
        column: String,
    },

    /// A metric name repeats a column or an earlier metric.
    #[error("{0}: name already in use")]
    DuplicateName(String),

    /// A look-back metric left every row undefined.
    #[error("{metric}: needs more than {rows} rows of history")]
    InsufficientHistory {
        /// Metric being computed.
        metric: String,
        /// Rows available.
        rows: usize,
    },

    /// A row-wise metric was undefined (NaN or infinite) on every row.
    #[error("{0}: undefined on every row")]
    Undefined(String),

    /// The computed column could not be added.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl MetricError {
    /// Returns the metric the error refers to, if any.
    #[must_use]
    pub fn metric(&self) -> Option<&str> {
        match self {
            Self::MissingDependency { metric, .. }
            | Self::UndeclaredInput { metric, .. }
            | Self::InsufficientHistory { metric, .. }
            | Self::DuplicateName(metric)
            | Self::Undefined(metric) => Some(metric.as_str()),
            Self::Table(_) => None,
        }
    }
}

impl From<MetricError> for MacrolensError {
    fn from(err: MetricError) -> Self {
        match err {
            MetricError::MissingDependency { metric, column } => {
                Self::MissingDependency { metric, column }
            }
            MetricError::Table(e) => Self::Table(e),
            other => Self::Metric(other.to_string()),
        }
    }
}
