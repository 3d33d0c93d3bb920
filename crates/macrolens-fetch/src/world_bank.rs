//! World Bank indicator API adapter.
//!
//! The API answers with a two-element array: paging metadata, then the
//! observations ordered newest first. Null values are common for the most
//! recent years, so the latest usable figure is found by scanning in order.

use async_trait::async_trait;
use chrono::NaiveDate;
use macrolens_catalog::SeriesCatalog;
use macrolens_types::{Observation, RawSeries, ScalarRecord};
use serde::Deserialize;
use tracing::debug;

use crate::{FetchError, FetchOptions, HttpClient, SourceAdapter, url::Endpoints};

/// One row of a World Bank indicator response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldBankEntry {
    /// Period label, a year such as `"2024"`.
    pub date: String,
    /// Reported value; `None` when the year is not yet published.
    pub value: Option<f64>,
}

impl WorldBankEntry {
    /// Returns December 31 of the entry's year, if the label starts with one.
    #[must_use]
    pub fn year_end(&self) -> Option<NaiveDate> {
        let year: i32 = self.date.get(..4)?.parse().ok()?;
        NaiveDate::from_ymd_opt(year, 12, 31)
    }
}

/// Parses a World Bank indicator response into its entries, in response order.
///
/// # Errors
///
/// Returns an error if the payload is not the expected two-element array, or
/// [`FetchError::Empty`] if the data part is null.
pub fn parse_world_bank(body: &str) -> Result<Vec<WorldBankEntry>, FetchError> {
    let mut parts: Vec<serde_json::Value> = serde_json::from_str(body)?;
    if parts.len() < 2 {
        let detail = parts
            .first()
            .and_then(|meta| meta.get("message"))
            .map_or_else(|| "missing data array".to_string(), ToString::to_string);
        return Err(FetchError::Parse(detail));
    }

    let data = parts.swap_remove(1);
    if data.is_null() {
        return Err(FetchError::Empty("no entries".to_string()));
    }
    Ok(serde_json::from_value(data)?)
}

/// Returns the first entry carrying a value, scanning in the given order.
///
/// Ties cannot occur: the first match wins and later entries are not read.
#[must_use]
pub fn latest_valid(entries: &[WorldBankEntry]) -> Option<(&WorldBankEntry, f64)> {
    for entry in entries {
        if let Some(value) = entry.value {
            return Some((entry, value));
        }
    }
    None
}

/// Fetches World Bank indicators for a country.
///
/// Identifiers have the form `CC/INDICATOR`, for example
/// `CHN/FI.RES.TOTL.CD`. By default the adapter returns the latest non-null
/// value as a scalar; [`WorldBankAdapter::with_history`] returns every
/// non-null year as a series instead.
#[derive(Debug, Clone)]
pub struct WorldBankAdapter {
    client: HttpClient,
    endpoints: Endpoints,
    history: bool,
    scaled: bool,
}

impl WorldBankAdapter {
    const LATEST_PAGE: u32 = 10;
    const HISTORY_PAGE: u32 = 100;

    /// Creates a new adapter returning the latest value.
    #[must_use]
    pub const fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            history: false,
            scaled: true,
        }
    }

    /// Returns every non-null year as a time series.
    #[must_use]
    pub const fn with_history(mut self) -> Self {
        self.history = true;
        self
    }

    /// Disables catalog scaling; values are returned as published.
    #[must_use]
    pub const fn raw(mut self) -> Self {
        self.scaled = false;
        self
    }
}

fn split_identifier(identifier: &str) -> Result<(&str, &str), FetchError> {
    identifier
        .split_once('/')
        .filter(|(cc, ind)| !cc.is_empty() && !ind.is_empty())
        .ok_or_else(|| {
            FetchError::InvalidIdentifier(format!("{identifier}: expected COUNTRY/INDICATOR"))
        })
}

#[async_trait]
impl SourceAdapter for WorldBankAdapter {
    fn name(&self) -> &str {
        "worldbank"
    }

    async fn fetch(
        &self,
        identifier: &str,
        _options: &FetchOptions,
    ) -> Result<RawSeries, FetchError> {
        let (country, indicator) = split_identifier(identifier)?;
        let per_page = if self.history {
            Self::HISTORY_PAGE
        } else {
            Self::LATEST_PAGE
        };
        let url = self.endpoints.world_bank_url(country, indicator, per_page)?;
        let body = self.client.get_text(&url).await?;
        let entries = parse_world_bank(&body)?;
        debug!(identifier, entries = entries.len(), "parsed World Bank response");

        let series = if self.history {
            let mut observations: Vec<Observation> = entries
                .iter()
                .filter_map(|e| Some(Observation::new(e.year_end()?, e.value?)))
                .collect();
            observations.sort_by_key(|o| o.date);
            RawSeries::Observations(observations)
        } else {
            let (entry, value) = latest_valid(&entries)
                .ok_or_else(|| FetchError::Empty(format!("{identifier}: every value is null")))?;
            RawSeries::Scalar(ScalarRecord::new(&entry.date, value, entry.year_end()))
        };

        Ok(if self.scaled {
            series.scaled(SeriesCatalog::global().scale_for(identifier))
        } else {
            series
        })
    }
}
