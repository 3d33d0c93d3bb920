//! Date ranges and trailing look-back periods.

use chrono::{Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::DateRangeError;

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the range contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Trailing look-back window requested from an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Period {
    /// Last N days.
    Days(u32),
    /// Last N months.
    Months(u32),
    /// Last N years.
    Years(u32),
    /// One year, the default window for market data.
    #[default]
    OneYear,
    /// Everything the upstream has.
    Max,
}

impl Period {
    /// Returns the window ending at `end`, or `None` for [`Period::Max`].
    #[must_use]
    pub fn window(&self, end: NaiveDate) -> Option<DateRange> {
        let start = match *self {
            Self::Days(n) => end.checked_sub_signed(TimeDelta::days(i64::from(n))),
            Self::Months(n) => end.checked_sub_months(Months::new(n)),
            Self::Years(n) => end.checked_sub_months(Months::new(n.saturating_mul(12))),
            Self::OneYear => end.checked_sub_months(Months::new(12)),
            Self::Max => None,
        }?;
        Some(DateRange { start, end })
    }

    /// Returns the period in the `range` query syntax of chart APIs (`5d`, `6mo`, `1y`).
    #[must_use]
    pub fn as_query(&self) -> String {
        match self {
            Self::Days(n) => format!("{n}d"),
            Self::Months(n) => format!("{n}mo"),
            Self::Years(n) => format!("{n}y"),
            Self::OneYear => "1y".to_string(),
            Self::Max => "max".to_string(),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "max" {
            return Ok(Self::Max);
        }

        let split = lower
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| PeriodParseError(s.to_string()))?;
        let (count, unit) = lower.split_at(split);
        let count: u32 = count.parse().map_err(|_| PeriodParseError(s.to_string()))?;
        if count == 0 {
            return Err(PeriodParseError(s.to_string()));
        }

        match unit {
            "d" => Ok(Self::Days(count)),
            "mo" => Ok(Self::Months(count)),
            "y" if count == 1 => Ok(Self::OneYear),
            "y" => Ok(Self::Years(count)),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid period string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(String);

impl std::fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid period '{}', expected e.g. 5d, 6mo, 1y, 10y or max",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}
