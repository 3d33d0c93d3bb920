//! The named macro dashboards.
//!
//! - [`Dashboard`] - series requests plus metric specs, run end to end
//! - [`DashboardKind`] - the built-in dashboards
//! - [`Sources`] - one adapter per upstream provider
//! - [`Lookups`] - TIC holdings, reserves and news

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrolens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod boards;
mod dashboard;
mod error;
mod lookups;
mod sources;

pub use dashboard::{Dashboard, DashboardKind, Report, RunSettings};
pub use error::DashboardError;
pub use lookups::{Holding, Lookups, RESERVES_INDICATOR, Reserves, TopicNews};
pub use sources::Sources;
