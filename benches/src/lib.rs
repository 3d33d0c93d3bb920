//! Synthetic inputs for the macrolens benchmarks.

use chrono::{Days, NaiveDate};
use macrolens_fetch::SeriesOutcome;
use macrolens_types::{Observation, RawSeries};

/// Shape of one synthetic series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesShape {
    /// Days between observations.
    pub step_days: u64,
    /// Offset of the first observation from the start date, in days.
    pub offset_days: u64,
}

/// Daily, weekly, monthly and quarterly series starting on staggered dates.
pub const MIXED_SHAPES: [SeriesShape; 4] = [
    SeriesShape {
        step_days: 1,
        offset_days: 0,
    },
    SeriesShape {
        step_days: 7,
        offset_days: 2,
    },
    SeriesShape {
        step_days: 30,
        offset_days: 5,
    },
    SeriesShape {
        step_days: 91,
        offset_days: 11,
    },
];

/// Builds `days` worth of observations for one shape.
pub fn synthetic_series(start: NaiveDate, days: u64, shape: SeriesShape) -> Vec<Observation> {
    (shape.offset_days..days)
        .step_by(shape.step_days.max(1) as usize)
        .filter_map(|d| {
            let date = start.checked_add_days(Days::new(d))?;
            Some(Observation::new(date, 100.0 + (d as f64 * 0.37).sin() * 10.0))
        })
        .collect()
}

/// One successful outcome per column name, cycling through [`MIXED_SHAPES`].
pub fn synthetic_outcomes(names: &[&str], days: u64) -> Vec<SeriesOutcome> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default();
    names
        .iter()
        .zip(MIXED_SHAPES.iter().cycle())
        .map(|(name, shape)| SeriesOutcome {
            name: (*name).to_string(),
            source_id: (*name).to_string(),
            result: Ok(RawSeries::Observations(synthetic_series(start, days, *shape))),
        })
        .collect()
}
