//! Treasury International Capital (TIC) holdings report adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use macrolens_catalog::SeriesCatalog;
use macrolens_types::{RawSeries, ScalarRecord};
use tracing::debug;

use crate::{FetchError, FetchOptions, HttpClient, SourceAdapter, url::Endpoints};

/// Holders reported by the `tic` command: `(key, label substring)`.
pub const TRACKED_HOLDERS: &[(&str, &str)] = &[("China", "China, Mainland"), ("Japan", "Japan")];

/// Scans a TIC report for the given holders.
///
/// For each `(key, needle)` pair, the last line containing `needle` wins and
/// its last whitespace-delimited token is returned verbatim. Holders with no
/// matching line are absent from the map.
#[must_use]
pub fn parse_tic_holdings(text: &str, holders: &[(&str, &str)]) -> HashMap<String, String> {
    let mut found = HashMap::new();
    for line in text.lines() {
        for &(key, needle) in holders {
            if !line.contains(needle) {
                continue;
            }
            if let Some(token) = line.split_whitespace().next_back() {
                found.insert(key.to_string(), token.to_string());
            }
        }
    }
    found
}

/// Fetches the latest holdings figure for one holder from the TIC report.
///
/// The identifier is the label substring, for example `China, Mainland`.
/// Values are in billions of dollars.
#[derive(Debug, Clone)]
pub struct TicAdapter {
    client: HttpClient,
    endpoints: Endpoints,
}

impl TicAdapter {
    /// Creates a new adapter.
    #[must_use]
    pub const fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Downloads the report once and extracts every requested holder.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be downloaded.
    pub async fn fetch_holdings(
        &self,
        holders: &[(&str, &str)],
    ) -> Result<HashMap<String, String>, FetchError> {
        let text = self.client.get_text(&self.endpoints.tic).await?;
        let holdings = parse_tic_holdings(&text, holders);
        debug!(found = holdings.len(), requested = holders.len(), "parsed TIC report");
        Ok(holdings)
    }
}

#[async_trait]
impl SourceAdapter for TicAdapter {
    fn name(&self) -> &str {
        "tic"
    }

    async fn fetch(
        &self,
        identifier: &str,
        _options: &FetchOptions,
    ) -> Result<RawSeries, FetchError> {
        let holdings = self.fetch_holdings(&[(identifier, identifier)]).await?;
        let token = holdings
            .get(identifier)
            .ok_or_else(|| FetchError::Empty(format!("{identifier:?} not in TIC report")))?;
        let value: f64 = token.replace(',', "").parse().map_err(|e| {
            FetchError::Parse(format!("{identifier}: last token {token:?} is not a number: {e}"))
        })?;

        let scale = SeriesCatalog::global().scale_for(identifier);
        Ok(RawSeries::Scalar(ScalarRecord::new(identifier, value / scale, None)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    const REPORT: &str = "
    Major Foreign Holders of Treasury Securities
    (in billions of dollars)

    Country          Jan    Feb    Mar
    China, Mainland  800.1  800.5  850.2
    Japan            1100.1 1100.2 1150.5
    UK               500.0  500.0  500.0
    ";

    #[test]
    fn test_tracked_holders() {
        let holdings = parse_tic_holdings(REPORT, TRACKED_HOLDERS);
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings["China"], "850.2");
        assert_eq!(holdings["Japan"], "1150.5");
    }

    #[test]
    fn test_last_matching_line_wins() {
        let text = "Japan 1.0 2.0\nnotes\nJapan (revised) 3.0 4.0\n";
        let holdings = parse_tic_holdings(text, &[("Japan", "Japan")]);
        assert_eq!(holdings["Japan"], "4.0");
    }

    #[test]
    fn test_missing_holder_absent() {
        let holdings = parse_tic_holdings("UK 1 2 3", TRACKED_HOLDERS);
        assert!(holdings.is_empty());
    }

    #[tokio::test]
    async fn test_adapter_scalar() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tic/mfh.txt")
            .with_body(REPORT)
            .create_async()
            .await;

        let client = HttpClient::new(ClientConfig::default()).unwrap();
        let adapter = TicAdapter::new(client, Endpoints::under(&server.url()));
        let series = adapter
            .fetch("China, Mainland", &FetchOptions::default())
            .await
            .unwrap();
        assert_eq!(series.latest(), Some(850.2));

        let missing = adapter.fetch("Atlantis", &FetchOptions::default()).await;
        assert!(matches!(missing, Err(FetchError::Empty(_))));
    }
}
