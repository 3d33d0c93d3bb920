//! Observations and raw series as produced by source adapters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DateRange;

/// A single dated value of an upstream series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed value, already scaled to the series' working unit.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Returns a copy with the value divided by `scale`.
    #[must_use]
    pub fn scaled(self, scale: f64) -> Self {
        Self {
            date: self.date,
            value: self.value / scale,
        }
    }
}

/// A single labeled value for sources that are not time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarRecord {
    /// Upstream label of the value (a year, a country, a query).
    pub label: String,
    /// The value.
    pub value: f64,
    /// Date the value refers to, when the upstream reports one.
    pub as_of: Option<NaiveDate>,
}

impl ScalarRecord {
    /// Creates a new scalar record.
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, as_of: Option<NaiveDate>) -> Self {
        Self {
            label: label.into(),
            value,
            as_of,
        }
    }
}

/// Series returned by a source adapter.
///
/// Ownership passes to the aggregator, which only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawSeries {
    /// A time-indexed sequence of observations.
    Observations(Vec<Observation>),
    /// A single scalar record, broadcast across rows when aggregated.
    Scalar(ScalarRecord),
}

impl RawSeries {
    /// Returns true if the series carries no data points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Observations(obs) => obs.is_empty(),
            Self::Scalar(_) => false,
        }
    }

    /// Returns the number of data points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Observations(obs) => obs.len(),
            Self::Scalar(_) => 1,
        }
    }

    /// Returns the most recent value: the last-dated observation or the scalar.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        match self {
            Self::Observations(obs) => obs.iter().max_by_key(|o| o.date).map(|o| o.value),
            Self::Scalar(record) => Some(record.value),
        }
    }

    /// Returns the series with every value divided by `scale`.
    #[must_use]
    pub fn scaled(self, scale: f64) -> Self {
        match self {
            Self::Observations(obs) => {
                Self::Observations(obs.into_iter().map(|o| o.scaled(scale)).collect())
            }
            Self::Scalar(record) => Self::Scalar(ScalarRecord {
                value: record.value / scale,
                ..record
            }),
        }
    }

    /// Keeps only observations inside `range`. Scalars are returned unchanged.
    #[must_use]
    pub fn within(self, range: &DateRange) -> Self {
        match self {
            Self::Observations(obs) => {
                Self::Observations(obs.into_iter().filter(|o| range.contains(o.date)).collect())
            }
            scalar @ Self::Scalar(_) => scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_latest_uses_date_not_position() {
        let series = RawSeries::Observations(vec![
            Observation::new(date(2024, 3, 1), 3.0),
            Observation::new(date(2024, 1, 1), 1.0),
        ]);
        assert_eq!(series.latest(), Some(3.0));
    }

    #[test]
    fn test_scaled_yield_index() {
        let series = RawSeries::Observations(vec![Observation::new(date(2024, 1, 2), 4.2)]);
        let scaled = series.scaled(100.0);
        assert_eq!(scaled.latest(), Some(0.042));
    }

    #[test]
    fn test_scalar_scaled_keeps_label() {
        let series = RawSeries::Scalar(ScalarRecord::new("2024", 3.4e12, None));
        match series.scaled(1e12) {
            RawSeries::Scalar(record) => {
                assert_eq!(record.label, "2024");
                assert!((record.value - 3.4).abs() < 1e-12);
            }
            RawSeries::Observations(_) => panic!("expected scalar"),
        }
    }

    #[test]
    fn test_within_range() {
        let series = RawSeries::Observations(vec![
            Observation::new(date(2023, 1, 1), 1.0),
            Observation::new(date(2024, 1, 1), 2.0),
        ]);
        let range = DateRange::new(date(2023, 6, 1), date(2024, 6, 1)).unwrap();
        assert_eq!(series.within(&range).len(), 1);
    }
}
