//! One-shot lookups that are not dashboards: TIC holdings, reserves, news.

use std::future::Future;
use std::time::Duration;

use macrolens_fetch::url::Endpoints;
use macrolens_fetch::{
    Article, FetchError, FetchOptions, GdeltAdapter, HttpClient, SourceAdapter, TRACKED_HOLDERS,
    TRACKED_TOPICS, TicAdapter, WorldBankAdapter,
};
use macrolens_types::RawSeries;
use tracing::warn;

use crate::DashboardError;

/// World Bank indicator for total reserves including gold.
pub const RESERVES_INDICATOR: &str = "FI.RES.TOTL.CD";

const TRILLION: f64 = 1e12;

/// Treasury holdings of one tracked holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holding {
    /// Holder key (`China`, `Japan`).
    pub holder: String,
    /// Latest figure in billions, as printed in the report.
    pub billions: String,
}

/// Latest total reserves of one country.
#[derive(Debug, Clone, PartialEq)]
pub struct Reserves {
    /// ISO3 country code.
    pub country: String,
    /// Year of the reported value.
    pub year: String,
    /// Total reserves in trillions of USD.
    pub trillions: f64,
}

/// Recent articles for one tracked topic.
#[derive(Debug)]
pub struct TopicNews {
    /// Display name of the topic.
    pub topic: String,
    /// Articles, or why they could not be fetched.
    pub articles: Result<Vec<Article>, FetchError>,
}

/// Adapters used by the lookups.
#[derive(Debug, Clone)]
pub struct Lookups {
    tic: TicAdapter,
    world_bank: WorldBankAdapter,
    gdelt: GdeltAdapter,
    timeout: Duration,
}

impl Lookups {
    /// Creates the lookups over live endpoints with a 30 second timeout per call.
    #[must_use]
    pub fn new(client: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            tic: TicAdapter::new(client.clone(), endpoints.clone()),
            world_bank: WorldBankAdapter::new(client.clone(), endpoints.clone()).raw(),
            gdelt: GdeltAdapter::new(client, endpoints),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the upper bound on each upstream call, retries included.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn timed<T>(
        &self,
        call: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or_else(|_| Err(FetchError::Timeout(self.timeout)))
    }

    /// Returns the holdings of every tracked holder found in the TIC report.
    ///
    /// Holders missing from the report are left out; the order follows
    /// [`TRACKED_HOLDERS`].
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be downloaded in time.
    pub async fn tic_holdings(&self) -> Result<Vec<Holding>, DashboardError> {
        let mut found = self.timed(self.tic.fetch_holdings(TRACKED_HOLDERS)).await?;
        Ok(TRACKED_HOLDERS
            .iter()
            .filter_map(|(holder, _)| {
                found.remove(*holder).map(|billions| Holding {
                    holder: (*holder).to_string(),
                    billions,
                })
            })
            .collect())
    }

    /// Returns the latest non-null total reserves for `country`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or every reported year is null.
    pub async fn reserves(&self, country: &str) -> Result<Reserves, DashboardError> {
        let country = country.to_uppercase();
        let identifier = format!("{country}/{RESERVES_INDICATOR}");
        let options = FetchOptions::default().with_timeout(self.timeout);
        match self
            .timed(self.world_bank.fetch(&identifier, &options))
            .await?
        {
            RawSeries::Scalar(record) => Ok(Reserves {
                country,
                year: record.label,
                trillions: record.value / TRILLION,
            }),
            RawSeries::Observations(_) => Err(FetchError::Parse(format!(
                "{identifier}: expected a single value"
            ))
            .into()),
        }
    }

    /// Fetches up to `sample` recent articles for each tracked topic.
    ///
    /// Topics are fetched one after another; a failed or timed-out topic does
    /// not stop the others.
    pub async fn news(&self, sample: usize) -> Vec<TopicNews> {
        let mut out = Vec::with_capacity(TRACKED_TOPICS.len());
        for (topic, query) in TRACKED_TOPICS {
            let articles = self
                .timed(self.gdelt.fetch_articles(query))
                .await
                .map(|mut articles| {
                    articles.truncate(sample);
                    articles
                });
            if let Err(error) = &articles {
                warn!(topic, %error, "news unavailable");
            }
            out.push(TopicNews {
                topic: (*topic).to_string(),
                articles,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use macrolens_fetch::ClientConfig;

    fn lookups(server: &mockito::Server) -> Lookups {
        let config = ClientConfig {
            max_retries: 0,
            ..ClientConfig::default()
        };
        Lookups::new(HttpClient::new(config).unwrap(), Endpoints::under(&server.url()))
    }

    #[tokio::test]
    async fn test_tic_holdings_in_tracked_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tic/mfh.txt")
            .with_body("Japan  1100.2 1150.5\nChina, Mainland  800.5 850.2\n")
            .create_async()
            .await;

        let holdings = lookups(&server).tic_holdings().await.unwrap();
        assert_eq!(
            holdings,
            vec![
                Holding {
                    holder: "China".into(),
                    billions: "850.2".into()
                },
                Holding {
                    holder: "Japan".into(),
                    billions: "1150.5".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_reserves_in_trillions() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/worldbank/country/CHN/indicator/FI.RES.TOTL.CD")
            .match_query(mockito::Matcher::Any)
            .with_body(
                r#"[{"page": 1}, [{"date": "2024", "value": 3.4e12}, {"date": "2023", "value": 3.2e12}]]"#,
            )
            .create_async()
            .await;

        let reserves = lookups(&server).reserves("chn").await.unwrap();
        assert_eq!(reserves.country, "CHN");
        assert_eq!(reserves.year, "2024");
        assert_relative_eq!(reserves.trillions, 3.4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_call_times_out() {
        let client = HttpClient::new(ClientConfig::default()).unwrap();
        let lookups = Lookups::new(client, Endpoints::default())
            .with_timeout(Duration::from_millis(250));
        let stalled = std::future::pending::<Result<(), FetchError>>();
        let err = lookups.timed(stalled).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(t) if t == Duration::from_millis(250)));
    }

    #[tokio::test]
    async fn test_news_failure_is_per_topic() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gdelt/doc")
            .match_query(mockito::Matcher::UrlEncoded(
                "query".into(),
                "tariffs sourcelang:eng".into(),
            ))
            .with_body(r#"{"articles": [{"title": "a"}, {"title": "b"}, {"title": "c"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/gdelt/doc")
            .match_query(mockito::Matcher::UrlEncoded(
                "query".into(),
                "(tariffs OR protectionism) sourcelang:eng".into(),
            ))
            .with_status(500)
            .create_async()
            .await;

        let news = lookups(&server).news(2).await;
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].topic, "Tariffs");
        assert_eq!(news[0].articles.as_ref().unwrap().len(), 2);
        assert!(news[1].articles.is_err());
    }
}
