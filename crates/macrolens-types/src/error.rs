//! Error types for macrolens.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for macrolens operations.
pub type Result<T> = std::result::Result<T, MacrolensError>;

/// Errors that can occur while fetching, aggregating and deriving indicators.
#[derive(Error, Debug)]
pub enum MacrolensError {
    /// Transport or HTTP status failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Payload did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The call succeeded but carried no usable data.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Every requested series failed, or nothing survived alignment.
    #[error("No data available for {context}")]
    NoDataAvailable {
        /// What was being aggregated.
        context: String,
    },

    /// A metric needed a column that is not in the table.
    #[error("Metric {metric} is missing dependency {column}")]
    MissingDependency {
        /// The metric being computed.
        metric: String,
        /// The absent column.
        column: String,
    },

    /// A metric could not be computed for a reason other than a missing column.
    #[error("Metric error: {0}")]
    Metric(String),

    /// Series identifier not present in the catalog.
    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    /// Invalid date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// Table construction failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },
}

/// Errors raised when a table would break its shape invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Column length differs from the index length.
    #[error("Column {name} has {actual} values, index has {expected}")]
    LengthMismatch {
        /// Column name.
        name: String,
        /// Index length.
        expected: usize,
        /// Column length.
        actual: usize,
    },

    /// Column name already present.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Index is not strictly increasing.
    #[error("Index is not strictly increasing at {0}")]
    UnsortedIndex(NaiveDate),

    /// A value is NaN, which the table treats as missing.
    #[error("Column {name} has a missing value at {date}")]
    MissingValue {
        /// Column name.
        name: String,
        /// Row date.
        date: NaiveDate,
    },
}
