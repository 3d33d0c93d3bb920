//! End-to-end dashboard runs over in-memory adapters.

use std::collections::HashMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use macrolens_aggregate::AggregateError;
use macrolens_dashboard::boards::{
    CHINA_RESERVES, COPPER_PRICE, CORN_PRICE, DOLLAR_INDEX, INDUSTRIAL_PRODUCTION, NEWS_TARIFFS,
    TIC_CHINA, TRADE_BALANCE_TOTAL,
};
use macrolens_dashboard::{Dashboard, DashboardError, DashboardKind, RunSettings, Sources};
use macrolens_fetch::{FailureKind, FetchError, FetchOptions, SourceAdapter};
use macrolens_metrics::standard::columns::*;
use macrolens_metrics::{DerivePolicy, MetricError};
use macrolens_types::{Observation, Period, RawSeries, ScalarRecord};

/// Serves canned series by identifier; unknown identifiers fail.
#[derive(Debug, Default)]
struct FakeAdapter {
    series: HashMap<String, RawSeries>,
}

impl FakeAdapter {
    fn with(mut self, id: &str, series: RawSeries) -> Self {
        self.series.insert(id.to_string(), series);
        self
    }

    fn sources(self) -> Sources {
        Sources::from_adapters(Arc::new(self))
    }
}

#[async_trait]
impl SourceAdapter for FakeAdapter {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch(
        &self,
        identifier: &str,
        _options: &FetchOptions,
    ) -> Result<RawSeries, FetchError> {
        self.series
            .get(identifier)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: identifier.to_string(),
            })
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn series(points: &[(NaiveDate, f64)]) -> RawSeries {
    RawSeries::Observations(points.iter().map(|&(d, v)| Observation::new(d, v)).collect())
}

fn flat(d: NaiveDate, v: f64) -> RawSeries {
    series(&[(d, v)])
}

fn fiscal_adapter() -> FakeAdapter {
    let q = date(2024, 1, 1);
    FakeAdapter::default()
        .with("W006RC1Q027SBEA", flat(q, 1200.0))
        .with("A091RC1Q027SBEA", flat(q, 1200.0))
        .with("W823RC1", flat(q, 1200.0))
        .with("W824RC1", flat(q, 1200.0))
        .with("W825RC1", flat(q, 1200.0))
}

#[tokio::test]
async fn fiscal_ratios_from_latest_row() {
    let report = Dashboard::new(DashboardKind::Fiscal, &fiscal_adapter().sources())
        .run(&RunSettings::default())
        .await
        .unwrap();

    assert!(report.is_complete());
    let snapshot = report.snapshot().unwrap();
    assert_eq!(snapshot.as_of, date(2024, 1, 1));
    assert_eq!(snapshot.get(MANDATORY_PROXY), Some(3600.0));
    assert_eq!(snapshot.get(FISCAL_UNSUSTAINABILITY_RATIO), Some(4.0));
    assert_eq!(snapshot.get(INTEREST_REVENUE_RATIO), Some(1.0));
}

#[tokio::test]
async fn missing_component_aborts_by_default() {
    let mut adapter = fiscal_adapter();
    adapter.series.remove("W825RC1");
    let err = Dashboard::new(DashboardKind::Fiscal, &adapter.sources())
        .run(&RunSettings::default())
        .await
        .unwrap_err();

    let DashboardError::Metric(MetricError::MissingDependency { column, .. }) = &err else {
        panic!("expected a missing dependency, got {err:?}");
    };
    assert_eq!(column, MEDICAID);
}

#[tokio::test]
async fn missing_component_skipped_under_skip_policy() {
    let mut adapter = fiscal_adapter();
    adapter.series.remove("W825RC1");
    let settings = RunSettings {
        policy: Some(DerivePolicy::Skip),
        ..RunSettings::default()
    };
    let report = Dashboard::new(DashboardKind::Fiscal, &adapter.sources())
        .run(&settings)
        .await
        .unwrap();

    assert_eq!(report.source_failures.len(), 1);
    assert_eq!(report.source_failures[0].name, MEDICAID);
    assert_eq!(report.source_failures[0].kind(), FailureKind::Network);

    let skipped: Vec<_> = report.metric_failures.iter().map(|f| f.metric.as_str()).collect();
    assert_eq!(skipped, [MANDATORY_PROXY, FISCAL_UNSUSTAINABILITY_RATIO]);
    assert_eq!(report.snapshot().unwrap().get(INTEREST_REVENUE_RATIO), Some(1.0));
}

#[tokio::test]
async fn energy_value_of_money() {
    let d = date(2024, 6, 3);
    let adapter = FakeAdapter::default()
        .with("CL=F", flat(d, 75.0))
        .with("^TNX", flat(d, 0.042));
    let report = Dashboard::new(DashboardKind::Energy, &adapter.sources())
        .run(&RunSettings::default())
        .await
        .unwrap();

    let snapshot = report.snapshot().unwrap();
    let bond = 100.0 / 1.042_f64.powf(10.0);
    assert_relative_eq!(snapshot.get(BOND_PRICE).unwrap(), bond, max_relative = f64::EPSILON);
    assert_relative_eq!(
        snapshot.get(ENERGY_VALUE).unwrap(),
        bond / 75.0,
        max_relative = f64::EPSILON
    );
}

fn physical_without_oil() -> FakeAdapter {
    let d = date(2024, 6, 3);
    FakeAdapter::default()
        .with("^TNX", flat(d, 0.042))
        .with("HG=F", flat(d, 4.5))
        .with("ZW=F", flat(d, 610.0))
        .with("ZC=F", flat(d, 450.0))
        .with("IPG211111CN", flat(date(2024, 5, 1), 112.0))
}

#[tokio::test]
async fn physical_reports_what_it_can_without_oil() {
    let report = Dashboard::new(DashboardKind::Physical, &physical_without_oil().sources())
        .run(&RunSettings::default())
        .await
        .unwrap();

    assert_eq!(report.source_failures.len(), 1);
    assert_eq!(report.source_failures[0].name, OIL_PRICE);
    let skipped: Vec<_> = report.metric_failures.iter().map(|f| f.metric.as_str()).collect();
    assert_eq!(skipped, [ENERGY_VALUE]);

    let snapshot = report.snapshot().unwrap();
    assert_eq!(snapshot.get(COPPER_PRICE), Some(4.5));
    assert_eq!(snapshot.get(CORN_PRICE), Some(450.0));
    assert!(snapshot.get(BOND_PRICE).is_some());
    assert_eq!(snapshot.get(ENERGY_VALUE), None);
}

#[tokio::test]
async fn explicit_abort_overrides_dashboard_default() {
    let settings = RunSettings {
        policy: Some(DerivePolicy::Abort),
        ..RunSettings::default()
    };
    let err = Dashboard::new(DashboardKind::Physical, &physical_without_oil().sources())
        .run(&settings)
        .await
        .unwrap_err();

    let DashboardError::Metric(MetricError::MissingDependency { column, .. }) = &err else {
        panic!("expected a missing dependency, got {err:?}");
    };
    assert_eq!(column, OIL_PRICE);
}

#[tokio::test]
async fn geopolitics_skips_trade_balance_without_china_flows() {
    let d = date(2024, 4, 1);
    let adapter = FakeAdapter::default()
        .with("BOPGSTB", flat(d, -68.9))
        .with("INDPRO", flat(d, 102.5))
        .with(
            "tariffs",
            RawSeries::Scalar(ScalarRecord::new("tariffs", 250.0, Some(date(2024, 4, 2)))),
        );
    let report = Dashboard::new(DashboardKind::Geopolitics, &adapter.sources())
        .run(&RunSettings::default())
        .await
        .unwrap();

    let skipped: Vec<_> = report.metric_failures.iter().map(|f| f.metric.as_str()).collect();
    assert_eq!(skipped, [US_CHINA_TRADE_BALANCE]);
    let names: Vec<_> = report.table.column_names().collect();
    assert_eq!(names, [TRADE_BALANCE_TOTAL, INDUSTRIAL_PRODUCTION, NEWS_TARIFFS]);
    assert_eq!(report.snapshot().unwrap().get(TRADE_BALANCE_TOTAL), Some(-68.9));
}

#[tokio::test]
async fn every_source_failing_is_no_data() {
    let err = Dashboard::new(DashboardKind::Physical, &FakeAdapter::default().sources())
        .run(&RunSettings::default())
        .await
        .unwrap_err();

    match err {
        DashboardError::Aggregate(AggregateError::NoDataAvailable { requested, failures }) => {
            assert_eq!(requested, 6);
            assert_eq!(failures.len(), 6);
        }
        other => panic!("expected NoDataAvailable, got {other:?}"),
    }
}

#[tokio::test]
async fn scalars_broadcast_onto_series_dates() {
    let adapter = FakeAdapter::default()
        .with(
            "DTWEXBGS",
            series(&[(date(2024, 3, 1), 121.0), (date(2024, 3, 4), 122.5)]),
        )
        .with(
            "China, Mainland",
            RawSeries::Scalar(ScalarRecord::new("China, Mainland", 850.2, None)),
        )
        .with(
            "CHN/FI.RES.TOTL.CD",
            RawSeries::Scalar(ScalarRecord::new("2024", 3.4, Some(date(2024, 12, 31)))),
        );
    let report = Dashboard::new(DashboardKind::Dedollar, &adapter.sources())
        .run(&RunSettings::default())
        .await
        .unwrap();

    let names: Vec<_> = report.table.column_names().collect();
    assert_eq!(names, [DOLLAR_INDEX, TIC_CHINA, CHINA_RESERVES]);
    assert_eq!(report.table.len(), 2);
    assert_eq!(report.table.column(TIC_CHINA).unwrap(), &[850.2, 850.2]);
    assert_eq!(report.source_failures.len(), 4);
}

#[tokio::test]
async fn liquidity_yoy_over_weekly_rows() {
    let start = date(2023, 1, 4);
    let points: Vec<_> = (0..60u32)
        .map(|w| (start + Days::new(7 * u64::from(w)), 7000.0 + f64::from(w) * 10.0))
        .collect();
    let adapter = FakeAdapter::default().with("WALCL", series(&points));
    let settings = RunSettings {
        period: Some(Period::Max),
        concurrency: 4,
        ..RunSettings::default()
    };
    let report = Dashboard::new(DashboardKind::Liquidity, &adapter.sources())
        .run(&settings)
        .await
        .unwrap();

    assert_eq!(report.table.len(), 8);
    let first = report.table.column(FED_BALANCE_SHEET_YOY).unwrap()[0];
    assert_relative_eq!(first, (7520.0 / 7000.0 - 1.0) * 100.0, epsilon = 1e-9);
}
