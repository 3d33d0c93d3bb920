//! FRED graph CSV adapter.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use csv_async::AsyncReaderBuilder;
use futures::StreamExt;
use macrolens_catalog::SeriesCatalog;
use macrolens_types::{Observation, RawSeries};
use tracing::debug;

use crate::{FetchError, FetchOptions, HttpClient, SourceAdapter, url::Endpoints};

/// Marker FRED uses for a missing observation.
const MISSING: &str = ".";

/// Parses a FRED graph CSV download into observations.
///
/// The value column is the one headed by `series_id`, else `VALUE`, else the
/// first non-date column. Cells that are empty or hold FRED's `.` placeholder
/// are skipped.
///
/// # Errors
///
/// Returns an error if the CSV is malformed, has no date or value column, or
/// a non-missing cell does not parse.
pub async fn parse_fred_csv(body: &str, series_id: &str) -> Result<Vec<Observation>, FetchError> {
    let mut reader = AsyncReaderBuilder::new()
        .trim(csv_async::Trim::All)
        .create_reader(body.as_bytes());

    let headers = reader.headers().await?.clone();
    let date_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("DATE") || h.eq_ignore_ascii_case("observation_date"))
        .ok_or_else(|| FetchError::Parse(format!("{series_id}: no date column in {headers:?}")))?;
    let value_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(series_id))
        .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case("VALUE")))
        .or_else(|| (0..headers.len()).find(|&i| i != date_col))
        .ok_or_else(|| FetchError::Parse(format!("{series_id}: no value column in {headers:?}")))?;

    let mut observations = Vec::new();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        let record = record?;
        let (Some(date), Some(value)) = (record.get(date_col), record.get(value_col)) else {
            continue;
        };
        if value.is_empty() || value == MISSING {
            continue;
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| FetchError::Parse(format!("{series_id}: bad date {date:?}: {e}")))?;
        let value: f64 = value
            .parse()
            .map_err(|e| FetchError::Parse(format!("{series_id}: bad value {value:?}: {e}")))?;
        observations.push(Observation::new(date, value));
    }

    Ok(observations)
}

/// Fetches FRED series by ID.
#[derive(Debug, Clone)]
pub struct FredAdapter {
    client: HttpClient,
    endpoints: Endpoints,
    scaled: bool,
}

impl FredAdapter {
    /// Creates a new adapter.
    #[must_use]
    pub const fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            scaled: true,
        }
    }

    /// Disables catalog scaling; values are returned as published.
    #[must_use]
    pub const fn raw(mut self) -> Self {
        self.scaled = false;
        self
    }
}

#[async_trait]
impl SourceAdapter for FredAdapter {
    fn name(&self) -> &str {
        "fred"
    }

    async fn fetch(
        &self,
        identifier: &str,
        options: &FetchOptions,
    ) -> Result<RawSeries, FetchError> {
        let url = self.endpoints.fred_csv_url(identifier)?;
        let body = self.client.get_text(&url).await?;
        let observations = parse_fred_csv(&body, identifier).await?;
        debug!(series = identifier, rows = observations.len(), "parsed FRED CSV");

        let mut series = RawSeries::Observations(observations);
        if let Some(window) = options.period.window(Utc::now().date_naive()) {
            series = series.within(&window);
        }
        if self.scaled {
            series = series.scaled(SeriesCatalog::global().scale_for(identifier));
        }
        Ok(series)
    }
}
