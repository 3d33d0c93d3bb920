//! Market-data chart adapter (futures, yields, spot prices by ticker).

use async_trait::async_trait;
use chrono::DateTime;
use macrolens_catalog::SeriesCatalog;
use macrolens_types::{Frequency, Observation, RawSeries};
use serde::Deserialize;
use tracing::debug;

use crate::{FetchError, FetchOptions, HttpClient, SourceAdapter, url::Endpoints};

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parses a chart API response into daily closing observations.
///
/// Bars with a null close are skipped. When several bars fall on the same
/// UTC date, all are returned in source order.
///
/// # Errors
///
/// Returns an error if the payload is not a chart response, the API reports
/// an error, or the timestamp and close arrays have different lengths.
pub fn parse_chart(body: &str, symbol: &str) -> Result<Vec<Observation>, FetchError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;
    if let Some(err) = envelope.chart.error {
        return Err(FetchError::Parse(format!(
            "{symbol}: {} {}",
            err.code, err.description
        )));
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| FetchError::Empty(format!("{symbol}: no chart result")))?;
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    if closes.len() != result.timestamp.len() {
        return Err(FetchError::Parse(format!(
            "{symbol}: {} timestamps but {} closes",
            result.timestamp.len(),
            closes.len()
        )));
    }

    let mut observations = Vec::with_capacity(closes.len());
    for (ts, close) in result.timestamp.into_iter().zip(closes) {
        let Some(close) = close else { continue };
        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| FetchError::Parse(format!("{symbol}: bad timestamp {ts}")))?
            .date_naive();
        observations.push(Observation::new(date, close));
    }
    Ok(observations)
}

/// Fetches closing prices by ticker symbol.
#[derive(Debug, Clone)]
pub struct MarketAdapter {
    client: HttpClient,
    endpoints: Endpoints,
    scaled: bool,
}

impl MarketAdapter {
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
impl SourceAdapter for MarketAdapter {
    fn name(&self) -> &str {
        "market"
    }

    async fn fetch(
        &self,
        identifier: &str,
        options: &FetchOptions,
    ) -> Result<RawSeries, FetchError> {
        let frequency = options.frequency.unwrap_or(Frequency::Daily);
        let url = self
            .endpoints
            .chart_url(identifier, options.period, frequency)?;
        let body = self.client.get_text(&url).await?;
        let observations = parse_chart(&body, identifier)?;
        debug!(symbol = identifier, bars = observations.len(), "parsed chart");

        let series = RawSeries::Observations(observations);
        Ok(if self.scaled {
            series.scaled(SeriesCatalog::global().scale_for(identifier))
        } else {
            series
        })
    }
}
