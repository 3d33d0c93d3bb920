//! Upstream endpoint configuration and URL construction.

use macrolens_types::{Frequency, Period};
use reqwest::Url;

use crate::FetchError;

/// FRED graph CSV endpoint.
pub const FRED_CSV_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";
/// Market-data chart endpoint.
pub const MARKET_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
/// World Bank API root.
pub const WORLD_BANK_URL: &str = "https://api.worldbank.org/v2";
/// Major foreign holders of Treasury securities, plain-text report.
pub const TIC_URL: &str =
    "https://ticdata.treasury.gov/resource-center/data-chart-center/tic/Documents/mfh.txt";
/// GDELT doc API.
pub const GDELT_DOC_URL: &str = "https://api.gdeltproject.org/api/v2/doc/doc";

/// Base URLs of every upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// FRED graph CSV endpoint.
    pub fred: String,
    /// Market-data chart endpoint; the ticker is appended as a path segment.
    pub market: String,
    /// World Bank API root.
    pub world_bank: String,
    /// TIC report URL.
    pub tic: String,
    /// GDELT doc API.
    pub gdelt: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            fred: FRED_CSV_URL.to_string(),
            market: MARKET_CHART_URL.to_string(),
            world_bank: WORLD_BANK_URL.to_string(),
            tic: TIC_URL.to_string(),
            gdelt: GDELT_DOC_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every provider at a path under one base URL.
    ///
    /// Used to run adapters against a local mock server.
    #[must_use]
    pub fn under(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            fred: format!("{base}/fred/fredgraph.csv"),
            market: format!("{base}/market/chart"),
            world_bank: format!("{base}/worldbank"),
            tic: format!("{base}/tic/mfh.txt"),
            gdelt: format!("{base}/gdelt/doc"),
        }
    }

    /// Builds the CSV download URL for a FRED series.
    ///
    /// # Example
    ///
    /// ```
    /// use macrolens_fetch::url::Endpoints;
    ///
    /// let url = Endpoints::default().fred_csv_url("WALCL").unwrap();
    /// assert_eq!(url, "https://fred.stlouisfed.org/graph/fredgraph.csv?id=WALCL");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn fred_csv_url(&self, series_id: &str) -> Result<String, FetchError> {
        Url::parse_with_params(&self.fred, &[("id", series_id)])
            .map(String::from)
            .map_err(|e| invalid_base(&self.fred, &e))
    }

    /// Builds the chart URL for a ticker over a look-back period.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn chart_url(
        &self,
        symbol: &str,
        period: Period,
        frequency: Frequency,
    ) -> Result<String, FetchError> {
        let mut url = Url::parse(&self.market).map_err(|e| invalid_base(&self.market, &e))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidIdentifier(self.market.clone()))?
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", &period.as_query())
            .append_pair("interval", chart_interval(frequency));
        Ok(url.into())
    }

    /// Builds the World Bank indicator URL for a country.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn world_bank_url(
        &self,
        country: &str,
        indicator: &str,
        per_page: u32,
    ) -> Result<String, FetchError> {
        let mut url =
            Url::parse(&self.world_bank).map_err(|e| invalid_base(&self.world_bank, &e))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidIdentifier(self.world_bank.clone()))?
            .pop_if_empty()
            .extend(["country", country, "indicator", indicator]);
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("per_page", &per_page.to_string());
        Ok(url.into())
    }

    /// Builds the GDELT article-list URL for a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn gdelt_url(
        &self,
        query: &str,
        max_records: u32,
        timespan: &str,
    ) -> Result<String, FetchError> {
        let full_query = format!("{query} sourcelang:eng");
        let max_records = max_records.to_string();
        Url::parse_with_params(
            &self.gdelt,
            &[
                ("query", full_query.as_str()),
                ("mode", "artlist"),
                ("maxrecords", max_records.as_str()),
                ("format", "json"),
                ("timespan", timespan),
            ],
        )
        .map(String::from)
        .map_err(|e| invalid_base(&self.gdelt, &e))
    }
}

/// Maps a frequency onto the chart API's `interval` parameter.
const fn chart_interval(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Daily => "1d",
        Frequency::Weekly => "1wk",
        Frequency::Monthly => "1mo",
        Frequency::Quarterly => "3mo",
        // Annual bars are not offered; quarterly is the sparsest interval.
        Frequency::Annual => "3mo",
    }
}

fn invalid_base(base: &str, err: &impl std::fmt::Display) -> FetchError {
    FetchError::InvalidIdentifier(format!("bad endpoint {base}: {err}"))
}
