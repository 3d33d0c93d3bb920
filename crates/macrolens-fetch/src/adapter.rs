//! Source adapter interface and series requests.

use async_trait::async_trait;
use macrolens_types::{Frequency, Period, RawSeries};
use std::sync::Arc;
use std::time::Duration;

use crate::FetchError;

/// Options passed to every adapter call of one aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Trailing look-back window.
    pub period: Period,
    /// Requested sampling frequency, where the upstream supports choosing one.
    pub frequency: Option<Frequency>,
    /// Upper bound on one adapter call, retries included.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            period: Period::OneYear,
            frequency: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetchOptions {
    /// Sets the look-back period.
    #[must_use]
    pub const fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Sets the requested frequency.
    #[must_use]
    pub const fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A client for one upstream provider.
///
/// Implementations fail independently: an error from one adapter call never
/// affects another.
#[async_trait]
pub trait SourceAdapter: Send + Sync + std::fmt::Debug {
    /// Short provider name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Fetches the series identified by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the payload has an unexpected
    /// shape, or it carries no usable data.
    async fn fetch(
        &self,
        identifier: &str,
        options: &FetchOptions,
    ) -> Result<RawSeries, FetchError>;
}

/// Shared handle to an adapter.
pub type AdapterRef = Arc<dyn SourceAdapter>;

/// One named input an aggregation must obtain.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    /// Column name in the consolidated table.
    pub name: String,
    /// Identifier passed to the adapter.
    pub source_id: String,
    /// Adapter that serves the request.
    pub adapter: AdapterRef,
}

impl SeriesRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(name: impl Into<String>, source_id: impl Into<String>, adapter: AdapterRef) -> Self {
        Self {
            name: name.into(),
            source_id: source_id.into(),
            adapter,
        }
    }
}

impl std::fmt::Display for SeriesRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <- {}:{}", self.name, self.adapter.name(), self.source_id)
    }
}
