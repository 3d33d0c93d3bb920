//! Fan-out fetch and merge onto a common calendar.

use chrono::{NaiveDate, Utc};
use futures::StreamExt;
use macrolens_fetch::{FetchError, FetchOptions, SeriesOutcome, SeriesRequest, series_stream};
use macrolens_types::{ConsolidatedTable, Observation, RawSeries};
use tracing::{debug, info};

use crate::fill::{forward_fill, normalize};
use crate::{AggregateError, SourceFailure};

/// Dates the consolidated table is built on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Calendar {
    /// Every date observed in any fetched time series.
    #[default]
    Union,
    /// The observation dates of one named series.
    Anchor(String),
}

/// Output of a successful aggregation.
#[derive(Debug)]
pub struct Aggregation {
    /// The consolidated table.
    pub table: ConsolidatedTable,
    /// Series that were requested but left out.
    pub failures: Vec<SourceFailure>,
}

/// Fetches a set of series and merges them into one table.
#[derive(Debug, Clone)]
pub struct Aggregator {
    options: FetchOptions,
    concurrency: usize,
    calendar: Calendar,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(FetchOptions::default())
    }
}

impl Aggregator {
    /// Creates an aggregator issuing calls sequentially on the union calendar.
    #[must_use]
    pub fn new(options: FetchOptions) -> Self {
        Self {
            options,
            concurrency: 1,
            calendar: Calendar::Union,
        }
    }

    /// Sets the maximum number of adapter calls in flight.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Returns the options passed to every adapter call.
    #[must_use]
    pub const fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetches every request and merges the successful series.
    ///
    /// Adapter failures never abort the other requests; they are returned in
    /// [`Aggregation::failures`].
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::NoDataAvailable`] if every request fails or
    /// no row is complete after alignment.
    pub async fn aggregate(
        &self,
        requests: &[SeriesRequest],
    ) -> Result<Aggregation, AggregateError> {
        let outcomes: Vec<SeriesOutcome> = series_stream(requests, &self.options, self.concurrency)
            .collect()
            .await;
        let aggregation = combine(outcomes, &self.calendar)?;
        info!(
            requested = requests.len(),
            columns = aggregation.table.width(),
            rows = aggregation.table.len(),
            failed = aggregation.failures.len(),
            "aggregated"
        );
        Ok(aggregation)
    }
}

enum Input {
    Series(Vec<Observation>),
    Scalar(f64, Option<NaiveDate>),
}

impl Input {
    fn dates(&self) -> Vec<NaiveDate> {
        match self {
            Self::Series(obs) => obs.iter().map(|o| o.date).collect(),
            Self::Scalar(..) => Vec::new(),
        }
    }
}

/// Merges adapter outcomes into a consolidated table.
///
/// Columns follow the order of the successful outcomes. Time series are
/// forward-filled onto `calendar`, scalars are broadcast to every row, and
/// rows with any missing value are dropped.
///
/// # Errors
///
/// Returns [`AggregateError::NoDataAvailable`] if no outcome succeeded or no
/// row is complete, and [`AggregateError::AnchorUnavailable`] if the anchor
/// series is missing.
pub fn combine(
    outcomes: Vec<SeriesOutcome>,
    calendar: &Calendar,
) -> Result<Aggregation, AggregateError> {
    let requested = outcomes.len();
    let mut inputs = Vec::with_capacity(requested);
    let mut failures = Vec::new();

    for outcome in outcomes {
        let input = match outcome.result {
            Ok(RawSeries::Observations(obs)) => {
                let obs = normalize(&obs);
                if obs.is_empty() {
                    Err(FetchError::Empty("every value is missing".to_string()))
                } else {
                    Ok(Input::Series(obs))
                }
            }
            Ok(RawSeries::Scalar(record)) if record.value.is_nan() => {
                Err(FetchError::Empty("scalar value is missing".to_string()))
            }
            Ok(RawSeries::Scalar(record)) => Ok(Input::Scalar(record.value, record.as_of)),
            Err(error) => Err(error),
        };
        match input {
            Ok(input) => inputs.push((outcome.name, input)),
            Err(error) => failures.push(SourceFailure {
                name: outcome.name,
                source_id: outcome.source_id,
                error,
            }),
        }
    }

    if inputs.is_empty() {
        return Err(AggregateError::NoDataAvailable {
            requested,
            failures,
        });
    }

    let dates = calendar_dates(&inputs, calendar)?;
    debug!(dates = dates.len(), inputs = inputs.len(), "aligning");

    let columns: Vec<(String, Vec<Option<f64>>)> = inputs
        .into_iter()
        .map(|(name, input)| {
            let values = match input {
                Input::Series(obs) => forward_fill(&obs, &dates),
                Input::Scalar(value, _) => vec![Some(value); dates.len()],
            };
            (name, values)
        })
        .collect();

    let keep: Vec<bool> = (0..dates.len())
        .map(|i| columns.iter().all(|(_, values)| values[i].is_some()))
        .collect();
    if !keep.contains(&true) {
        return Err(AggregateError::NoDataAvailable {
            requested,
            failures,
        });
    }

    let index = dates
        .into_iter()
        .zip(&keep)
        .filter_map(|(date, &k)| k.then_some(date))
        .collect();
    let mut table = ConsolidatedTable::new(index)?;
    for (name, values) in columns {
        let values = values
            .into_iter()
            .zip(&keep)
            .filter_map(|(v, &k)| if k { v } else { None })
            .collect();
        table = table.with_column(name, values)?;
    }
    Ok(Aggregation { table, failures })
}

fn calendar_dates(
    inputs: &[(String, Input)],
    calendar: &Calendar,
) -> Result<Vec<NaiveDate>, AggregateError> {
    let mut dates: Vec<NaiveDate> = match calendar {
        Calendar::Union => inputs.iter().flat_map(|(_, input)| input.dates()).collect(),
        Calendar::Anchor(anchor) => inputs
            .iter()
            .find(|(name, input)| name == anchor && matches!(input, Input::Series(_)))
            .map(|(_, input)| input.dates())
            .ok_or_else(|| AggregateError::AnchorUnavailable(anchor.clone()))?,
    };
    dates.sort_unstable();
    dates.dedup();

    if dates.is_empty() {
        // Scalars only: one row at the latest as-of date.
        let as_of = inputs
            .iter()
            .filter_map(|(_, input)| match input {
                Input::Scalar(_, as_of) => *as_of,
                Input::Series(_) => None,
            })
            .max()
            .unwrap_or_else(|| Utc::now().date_naive());
        dates.push(as_of);
    }
    Ok(dates)
}
