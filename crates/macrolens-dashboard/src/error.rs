//! Dashboard errors.

use macrolens_aggregate::AggregateError;
use macrolens_fetch::FetchError;
use macrolens_metrics::MetricError;
use macrolens_types::MacrolensError;
use thiserror::Error;

/// Errors raised while running a dashboard or a lookup.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No dashboard has this name.
    #[error("unknown dashboard {0:?}")]
    UnknownDashboard(String),

    /// Aggregation produced no usable table.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Metric derivation failed under the abort policy.
    #[error(transparent)]
    Metric(#[from] MetricError),

    /// A lookup's single upstream call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl From<DashboardError> for MacrolensError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Aggregate(e) => e.into(),
            DashboardError::Metric(e) => e.into(),
            DashboardError::Fetch(e) => e.into(),
            DashboardError::UnknownDashboard(name) => Self::UnknownSeries(name),
        }
    }
}
