//! Fan-out over a set of series requests.

use futures::stream::{self, Stream, StreamExt};
use macrolens_types::RawSeries;
use tracing::{debug, warn};

use crate::{FetchError, FetchOptions, SeriesRequest};

/// Result of one adapter call, tagged with the request it answers.
#[derive(Debug)]
pub struct SeriesOutcome {
    /// Requested column name.
    pub name: String,
    /// Identifier passed to the adapter.
    pub source_id: String,
    /// Adapter result.
    pub result: Result<RawSeries, FetchError>,
}

impl SeriesOutcome {
    /// Returns true if the call produced a series.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs one request under the options' timeout.
///
/// An empty series is reported as [`FetchError::Empty`] so callers only see
/// series with data.
pub async fn fetch_one(request: &SeriesRequest, options: &FetchOptions) -> SeriesOutcome {
    let call = request.adapter.fetch(&request.source_id, options);
    let result = match tokio::time::timeout(options.timeout, call).await {
        Ok(Ok(series)) if series.is_empty() => Err(FetchError::Empty(format!(
            "{} returned no observations",
            request.source_id
        ))),
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(options.timeout)),
    };

    match &result {
        Ok(series) => debug!(name = %request.name, points = series.len(), "fetched"),
        Err(e) => warn!(
            name = %request.name,
            source = request.adapter.name(),
            id = %request.source_id,
            kind = %e.kind(),
            error = %e,
            "series unavailable"
        ),
    }

    SeriesOutcome {
        name: request.name.clone(),
        source_id: request.source_id.clone(),
        result,
    }
}

/// Creates a stream of outcomes, one per request, in request order.
///
/// At most `concurrency` calls are in flight; `1` issues them sequentially.
/// Every request yields an outcome whether it succeeds or not.
pub fn series_stream<'a>(
    requests: &'a [SeriesRequest],
    options: &'a FetchOptions,
    concurrency: usize,
) -> impl Stream<Item = SeriesOutcome> + 'a {
    stream::iter(requests)
        .map(move |request| fetch_one(request, options))
        .buffered(concurrency.max(1))
}
