//! Dashboard definition and execution.

use std::str::FromStr;
use std::time::Duration;

use macrolens_aggregate::{Aggregator, Calendar, SourceFailure};
use macrolens_fetch::{AdapterRef, FetchOptions, SeriesRequest};
use macrolens_metrics::{DerivePolicy, MetricEngine, MetricFailure, MetricSpec};
use macrolens_types::{ConsolidatedTable, Frequency, Period, Snapshot};
use tracing::{debug, info};

use crate::{DashboardError, Sources, boards};

/// The built-in dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardKind {
    /// Federal revenue against interest and mandatory spending.
    Fiscal,
    /// Barrels of oil a 10-year bond buys.
    Energy,
    /// Dollar dominance, neutral assets and foreign holdings.
    Dedollar,
    /// Energy, industrial metals and food.
    Physical,
    /// Trade conflict, onshoring and economic scale.
    Geopolitics,
    /// Fed balance sheet growth.
    Liquidity,
}

impl DashboardKind {
    /// Returns the command-line name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fiscal => "fiscal",
            Self::Energy => "energy",
            Self::Dedollar => "dedollar",
            Self::Physical => "physical",
            Self::Geopolitics => "geopolitics",
            Self::Liquidity => "liquidity",
        }
    }

    /// Returns a one-line title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Fiscal => "Fiscal Dominance",
            Self::Energy => "Energy-Value of Money",
            Self::Dedollar => "De-Dollarization",
            Self::Physical => "Physical Economy",
            Self::Geopolitics => "Geopolitical Realignment",
            Self::Liquidity => "Liquidity",
        }
    }

    /// Look-back used when the caller does not choose one.
    ///
    /// Quarterly fiscal data needs several years to fill every column, and
    /// the balance sheet YoY needs a year of warm-up.
    #[must_use]
    pub const fn default_period(&self) -> Period {
        match self {
            Self::Fiscal => Period::Years(5),
            Self::Liquidity => Period::Years(2),
            _ => Period::OneYear,
        }
    }

    /// Metric failure policy used when the caller does not choose one.
    ///
    /// Dashboards built around one headline ratio fail as a whole. The broad
    /// overviews drop the metric they cannot compute and report the rest.
    #[must_use]
    pub const fn default_policy(&self) -> DerivePolicy {
        match self {
            Self::Physical | Self::Geopolitics => DerivePolicy::Skip,
            Self::Fiscal | Self::Energy | Self::Dedollar | Self::Liquidity => DerivePolicy::Abort,
        }
    }

    /// Returns all dashboards.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fiscal,
            Self::Energy,
            Self::Dedollar,
            Self::Physical,
            Self::Geopolitics,
            Self::Liquidity,
        ]
    }
}

impl std::fmt::Display for DashboardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .find(|kind| kind.as_str() == lower)
            .copied()
            .ok_or_else(|| DashboardError::UnknownDashboard(s.to_string()))
    }
}

/// Caller-controlled settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Maximum adapter calls in flight.
    pub concurrency: usize,
    /// Overrides the dashboard's default metric failure policy.
    pub policy: Option<DerivePolicy>,
    /// Overrides the dashboard's default look-back.
    pub period: Option<Period>,
    /// Per-call timeout.
    pub timeout: Duration,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            concurrency: 1,
            policy: None,
            period: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Result of a dashboard run.
#[derive(Debug)]
pub struct Report {
    /// Which dashboard produced the report.
    pub kind: DashboardKind,
    /// Source columns followed by derived metrics.
    pub table: ConsolidatedTable,
    /// Series that could not be fetched.
    pub source_failures: Vec<SourceFailure>,
    /// Metrics skipped under [`DerivePolicy::Skip`].
    pub metric_failures: Vec<MetricFailure>,
}

impl Report {
    /// Returns the latest row.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.table.latest()
    }

    /// Returns true if every series and metric was produced.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.source_failures.is_empty() && self.metric_failures.is_empty()
    }
}

/// A named bundle of series requests and metric specs.
#[derive(Debug, Clone)]
pub struct Dashboard {
    kind: DashboardKind,
    requests: Vec<SeriesRequest>,
    metrics: Vec<MetricSpec>,
    calendar: Calendar,
    frequency: Option<Frequency>,
}

impl Dashboard {
    /// Builds a built-in dashboard over the given sources.
    #[must_use]
    pub fn new(kind: DashboardKind, sources: &Sources) -> Self {
        let (requests, metrics) = boards::build(kind, sources);
        let dashboard = Self {
            kind,
            requests,
            metrics,
            calendar: Calendar::Union,
            frequency: None,
        };
        match kind {
            // YoY lag is counted in rows, so stay on the weekly release dates.
            DashboardKind::Liquidity => dashboard
                .with_calendar(Calendar::Anchor(boards::FED_BALANCE_SHEET.to_string()))
                .with_frequency(Frequency::Weekly),
            _ => dashboard,
        }
    }

    /// Sets the calendar the table is aligned on.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the frequency requested from adapters.
    #[must_use]
    pub const fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Returns the dashboard kind.
    #[must_use]
    pub const fn kind(&self) -> DashboardKind {
        self.kind
    }

    /// Returns the series requests in column order.
    #[must_use]
    pub fn requests(&self) -> &[SeriesRequest] {
        &self.requests
    }

    /// Returns the metric specs in evaluation order.
    #[must_use]
    pub fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }

    /// Returns the calendar.
    #[must_use]
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Checks that every metric input is a requested column or an earlier metric.
    ///
    /// # Errors
    ///
    /// Returns the first undeclared input or duplicate name.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let declared = self.requests.iter().map(|r| r.name.as_str());
        MetricEngine::validate(&self.metrics, declared)?;
        Ok(())
    }

    /// Fetches, aligns and derives.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric specs are inconsistent, if no series
    /// produced a complete row, or if a metric fails under
    /// [`DerivePolicy::Abort`], whether chosen in `settings` or by
    /// [`DashboardKind::default_policy`].
    pub async fn run(&self, settings: &RunSettings) -> Result<Report, DashboardError> {
        self.validate()?;

        let period = settings
            .period
            .unwrap_or_else(|| self.kind.default_period());
        let policy = settings
            .policy
            .unwrap_or_else(|| self.kind.default_policy());
        let mut options = FetchOptions::default()
            .with_period(period)
            .with_timeout(settings.timeout);
        if let Some(frequency) = self.frequency {
            options = options.with_frequency(frequency);
        }
        debug!(
            dashboard = %self.kind,
            %period,
            %policy,
            series = self.requests.len(),
            "running dashboard"
        );

        let aggregation = Aggregator::new(options)
            .with_concurrency(settings.concurrency)
            .with_calendar(self.calendar.clone())
            .aggregate(&self.requests)
            .await?;

        let derivation = MetricEngine::new(policy).derive(aggregation.table, &self.metrics)?;

        info!(
            dashboard = %self.kind,
            rows = derivation.table.len(),
            source_failures = aggregation.failures.len(),
            metric_failures = derivation.failures.len(),
            "dashboard complete"
        );

        Ok(Report {
            kind: self.kind,
            table: derivation.table,
            source_failures: aggregation.failures,
            metric_failures: derivation.failures,
        })
    }
}

/// Builds a request for `adapter`.
pub(crate) fn request(name: &str, source_id: &str, adapter: &AdapterRef) -> SeriesRequest {
    SeriesRequest::new(name, source_id, std::sync::Arc::clone(adapter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(
            "Fiscal".parse::<DashboardKind>().unwrap(),
            DashboardKind::Fiscal
        );
        assert!(matches!(
            "budget".parse::<DashboardKind>(),
            Err(DashboardError::UnknownDashboard(_))
        ));
        for kind in DashboardKind::all() {
            assert_eq!(kind.as_str().parse::<DashboardKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_default_periods() {
        assert_eq!(DashboardKind::Fiscal.default_period(), Period::Years(5));
        assert_eq!(DashboardKind::Energy.default_period(), Period::OneYear);
    }

    #[test]
    fn test_default_policies() {
        assert_eq!(DashboardKind::Fiscal.default_policy(), DerivePolicy::Abort);
        assert_eq!(DashboardKind::Energy.default_policy(), DerivePolicy::Abort);
        assert_eq!(DashboardKind::Physical.default_policy(), DerivePolicy::Skip);
        assert_eq!(DashboardKind::Geopolitics.default_policy(), DerivePolicy::Skip);
        assert_eq!(RunSettings::default().policy, None);
    }
}
