//! HTTP client and source adapters for macrolens.
//!
//! This crate provides the fetch side of the pipeline:
//!
//! - [`HttpClient`] - HTTP client with connection pooling and bounded retries
//! - [`url::Endpoints`] - Upstream base URLs and URL construction
//! - [`SourceAdapter`] - The adapter interface, with one implementation per
//!   upstream: [`FredAdapter`], [`MarketAdapter`], [`WorldBankAdapter`],
//!   [`TicAdapter`], [`GdeltAdapter`]
//! - [`series_stream`] - Timed fan-out over a set of [`SeriesRequest`]s

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrolens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
mod client;
mod error;
mod fred;
mod gdelt;
mod market;
mod stream;
mod tic;
pub mod url;
mod world_bank;

pub use adapter::{AdapterRef, FetchOptions, SeriesRequest, SourceAdapter};
pub use client::{ClientConfig, HttpClient};
pub use error::{FailureKind, FetchError};
pub use fred::{FredAdapter, parse_fred_csv};
pub use gdelt::{Article, GdeltAdapter, MAX_RECORDS, TRACKED_TOPICS, parse_gdelt};
pub use market::{MarketAdapter, parse_chart};
pub use stream::{SeriesOutcome, fetch_one, series_stream};
pub use tic::{TRACKED_HOLDERS, TicAdapter, parse_tic_holdings};
pub use world_bank::{WorldBankAdapter, WorldBankEntry, latest_valid, parse_world_bank};
