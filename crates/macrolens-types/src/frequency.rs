//! Native sampling frequency of a series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sampling frequency of an upstream series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Trading-day observations.
    #[default]
    Daily,
    /// Weekly observations.
    Weekly,
    /// Monthly observations.
    Monthly,
    /// Quarterly observations.
    Quarterly,
    /// Annual observations.
    Annual,
}

impl Frequency {
    /// Returns the number of periods in one year.
    ///
    /// Daily series are counted on a 252 trading-day calendar.
    #[must_use]
    pub const fn periods_per_year(&self) -> usize {
        match self {
            Self::Daily => 252,
            Self::Weekly => 52,
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annual => 1,
        }
    }

    /// Returns the frequency as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }

    /// Returns all frequencies from densest to sparsest.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Quarterly,
            Self::Annual,
        ]
    }

    /// Infers the frequency from the median gap between sorted dates.
    ///
    /// Returns `None` when fewer than two dates are given.
    #[must_use]
    pub fn infer(dates: &[NaiveDate]) -> Option<Self> {
        if dates.len() < 2 {
            return None;
        }

        let mut gaps: Vec<i64> = dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .filter(|gap| *gap > 0)
            .collect();
        if gaps.is_empty() {
            return None;
        }
        gaps.sort_unstable();
        let median = gaps[gaps.len() / 2];

        // Weekends and holidays stretch daily gaps to 3-4 days.
        let frequency = match median {
            ..=4 => Self::Daily,
            5..=10 => Self::Weekly,
            11..=45 => Self::Monthly,
            46..=135 => Self::Quarterly,
            _ => Self::Annual,
        };
        Some(frequency)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d" | "daily" | "day" => Ok(Self::Daily),
            "w" | "weekly" | "week" => Ok(Self::Weekly),
            "m" | "monthly" | "month" => Ok(Self::Monthly),
            "q" | "quarterly" | "quarter" => Ok(Self::Quarterly),
            "a" | "y" | "annual" | "yearly" | "year" => Ok(Self::Annual),
            _ => Err(FrequencyParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid frequency string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(String);

impl std::fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid frequency '{}', expected one of: daily, weekly, monthly, quarterly, annual",
            self.0
        )
    }
}

impl std::error::Error for FrequencyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(spacing_days: i64, count: i64) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (0..count)
            .map(|i| start + chrono::TimeDelta::days(i * spacing_days))
            .collect()
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Frequency::Weekly.periods_per_year(), 52);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("Q".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_infer_weekly() {
        assert_eq!(Frequency::infer(&dates(7, 10)), Some(Frequency::Weekly));
    }

    #[test]
    fn test_infer_quarterly() {
        assert_eq!(Frequency::infer(&dates(91, 8)), Some(Frequency::Quarterly));
    }

    #[test]
    fn test_infer_needs_two_dates() {
        assert_eq!(Frequency::infer(&dates(1, 1)), None);
    }
}
