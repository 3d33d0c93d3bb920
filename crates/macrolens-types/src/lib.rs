//! Core types for the macrolens indicator pipeline.
//!
//! This crate provides the fundamental data structures used throughout macrolens:
//!
//! - [`Observation`] - A single dated value of an upstream series
//! - [`RawSeries`] - What a source adapter returns: observations or a scalar record
//! - [`ConsolidatedTable`] - Date-indexed table of fully populated columns
//! - [`Snapshot`] - The latest row of a table as a named record
//! - [`Indicator`] - Upstream series metadata
//! - [`Frequency`] - Native sampling frequency of a series
//! - [`Period`] and [`DateRange`] - Look-back windows

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrolens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod error;
mod frequency;
mod indicator;
mod observation;
mod table;

pub use date_range::{DateRange, Period, PeriodParseError};
pub use error::{DateRangeError, MacrolensError, Result, TableError};
pub use frequency::{Frequency, FrequencyParseError};
pub use indicator::{Indicator, Source};
pub use observation::{Observation, RawSeries, ScalarRecord};
pub use table::{ConsolidatedTable, Reading, Snapshot};
