//! Derived metrics for macrolens.
//!
//! - [`MetricSpec`] - A named metric, its input columns and its compute function
//! - [`MetricEngine`] - Ordered evaluation with dependency checks
//! - [`standard`] - The fiscal, energy, liquidity and trade ratios
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use macrolens_metrics::{MetricEngine, standard};
//! use macrolens_types::ConsolidatedTable;
//!
//! let table = ConsolidatedTable::new(vec![NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()])?
//!     .with_column("Oil_Price", vec![75.0])?
//!     .with_column("10Y_Yield", vec![0.042])?;
//!
//! let derived = MetricEngine::default().derive(table, &standard::energy_metrics())?;
//! assert!(derived.table.has_column("Energy_Value"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrolens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod spec;
pub mod standard;

pub use engine::{Derivation, DerivePolicy, MetricEngine, MetricFailure};
pub use error::MetricError;
pub use spec::{ColumnFn, Compute, MetricSpec, RowFn};
