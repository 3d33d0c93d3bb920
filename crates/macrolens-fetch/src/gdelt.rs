//! GDELT doc API adapter (news-mention counts and article samples).

use async_trait::async_trait;
use chrono::Utc;
use macrolens_types::{RawSeries, ScalarRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FetchError, FetchOptions, HttpClient, SourceAdapter, url::Endpoints};

/// Topics reported by the `news` command: `(label, query)`.
pub const TRACKED_TOPICS: &[(&str, &str)] = &[
    ("Tariffs", "tariffs"),
    ("Protectionism", "(tariffs OR protectionism)"),
];

/// Upper bound GDELT accepts for `maxrecords`.
pub const MAX_RECORDS: u32 = 250;

/// Look-back of every query.
const TIMESPAN: &str = "1d";

/// One article from an `artlist` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    /// Article URL.
    pub url: String,
    /// Headline.
    pub title: String,
    /// First-seen timestamp, `YYYYMMDDTHHMMSSZ`.
    pub seendate: String,
    /// Publishing domain.
    pub domain: String,
    /// Detected language.
    pub language: String,
    /// Source country.
    pub sourcecountry: String,
}

#[derive(Debug, Default, Deserialize)]
struct GdeltResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// Parses an `artlist` response.
///
/// A missing `articles` key or an empty body means no articles matched.
///
/// # Errors
///
/// Returns an error if the body is neither empty nor a JSON object. GDELT
/// answers malformed queries with a plain-text message, which ends up here.
pub fn parse_gdelt(body: &str) -> Result<Vec<Article>, FetchError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    if !body.starts_with('{') {
        let first_line = body.lines().next().unwrap_or_default();
        return Err(FetchError::Parse(format!("GDELT: {first_line}")));
    }
    let response: GdeltResponse = serde_json::from_str(body)?;
    Ok(response.articles)
}

/// Counts recent English-language articles matching a query.
#[derive(Debug, Clone)]
pub struct GdeltAdapter {
    client: HttpClient,
    endpoints: Endpoints,
    max_records: u32,
}

impl GdeltAdapter {
    /// Creates a new adapter over the last 24 hours.
    #[must_use]
    pub const fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            max_records: MAX_RECORDS,
        }
    }

    /// Sets the number of articles requested per query, capped at [`MAX_RECORDS`].
    #[must_use]
    pub fn with_max_records(mut self, max_records: u32) -> Self {
        self.max_records = max_records.clamp(1, MAX_RECORDS);
        self
    }

    /// Fetches up to the configured number of articles for a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn fetch_articles(&self, query: &str) -> Result<Vec<Article>, FetchError> {
        let url = self
            .endpoints
            .gdelt_url(query, self.max_records, TIMESPAN)?;
        let body = self.client.get_text(&url).await?;
        let articles = parse_gdelt(&body)?;
        debug!(query, articles = articles.len(), "parsed GDELT response");
        Ok(articles)
    }
}

#[async_trait]
impl SourceAdapter for GdeltAdapter {
    fn name(&self) -> &str {
        "gdelt"
    }

    async fn fetch(
        &self,
        identifier: &str,
        _options: &FetchOptions,
    ) -> Result<RawSeries, FetchError> {
        let articles = self.fetch_articles(identifier).await?;
        Ok(RawSeries::Scalar(ScalarRecord::new(
            identifier,
            articles.len() as f64,
            Some(Utc::now().date_naive()),
        )))
    }
}
