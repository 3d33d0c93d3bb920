//! Multi-source macro indicator aggregation.
//!
//! This is a facade crate that re-exports functionality from the macrolens
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use macrolens_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::with_defaults()?;
//!     let sources = Sources::new(client, Endpoints::default());
//!
//!     let report = Dashboard::new(DashboardKind::Energy, &sources)
//!         .run(&RunSettings::default())
//!         .await?;
//!
//!     if let Some(snapshot) = report.snapshot() {
//!         for (name, value) in snapshot.iter() {
//!             println!("{name}: {value:.4}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrolens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use macrolens_types::*;

// Re-export the series catalog
pub use macrolens_catalog::SeriesCatalog;

// Re-export adapters
pub use macrolens_fetch::url::Endpoints;
pub use macrolens_fetch::{
    AdapterRef, ClientConfig, FailureKind, FetchError, FetchOptions, FredAdapter, GdeltAdapter,
    HttpClient, MarketAdapter, SeriesOutcome, SeriesRequest, SourceAdapter, TicAdapter,
    WorldBankAdapter, series_stream,
};

// Re-export aggregation and metrics
pub use macrolens_aggregate::{
    AggregateError, Aggregation, Aggregator, Calendar, SourceFailure, combine, forward_fill,
};
pub use macrolens_metrics::{
    Derivation, DerivePolicy, MetricEngine, MetricError, MetricFailure, MetricSpec, standard,
};

// Re-export dashboards
#[cfg(feature = "dashboard")]
pub use macrolens_dashboard::{
    Dashboard, DashboardError, DashboardKind, Lookups, Report, RunSettings, Sources,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use macrolens_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use macrolens_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use macrolens_lib::prelude::*;
/// ```
pub mod prelude {
    pub use macrolens_types::{
        ConsolidatedTable, Frequency, MacrolensError, Observation, Period, RawSeries, Result,
        Snapshot,
    };

    pub use macrolens_catalog::SeriesCatalog;

    pub use macrolens_fetch::url::Endpoints;
    pub use macrolens_fetch::{ClientConfig, FetchOptions, HttpClient, SeriesRequest};

    pub use macrolens_aggregate::{Aggregator, Calendar};
    pub use macrolens_metrics::{DerivePolicy, MetricEngine, MetricSpec};

    #[cfg(feature = "dashboard")]
    pub use macrolens_dashboard::{Dashboard, DashboardKind, RunSettings, Sources};

    #[cfg(feature = "format")]
    pub use macrolens_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
