//! Multi-source aggregation for macrolens.
//!
//! This crate merges independently fetched series into one table:
//!
//! - [`Aggregator`] - Fans requests out to their adapters and merges the results
//! - [`combine`] - The merge step on its own, over already-fetched outcomes
//! - [`forward_fill`] - As-of alignment of a series onto a calendar

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrolens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod error;
mod fill;

pub use aggregator::{Aggregation, Aggregator, Calendar, combine};
pub use error::{AggregateError, SourceFailure};
pub use fill::{ForwardFill, forward_fill, normalize};
