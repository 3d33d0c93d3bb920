//! Forward-fill of observations onto a calendar.

use chrono::NaiveDate;
use macrolens_types::Observation;

/// Sorts observations by date and resolves duplicate dates.
///
/// When a date occurs more than once, the observation that came later in
/// source order wins. NaN values are dropped as missing.
#[must_use]
pub fn normalize(observations: &[Observation]) -> Vec<Observation> {
    let mut sorted: Vec<Observation> = observations
        .iter()
        .copied()
        .filter(|o| !o.value.is_nan())
        .collect();
    // Stable: equal dates keep source order, so the last one is the latest.
    sorted.sort_by_key(|o| o.date);

    let mut out: Vec<Observation> = Vec::with_capacity(sorted.len());
    for obs in sorted {
        match out.last_mut() {
            Some(last) if last.date == obs.date => *last = obs,
            _ => out.push(obs),
        }
    }
    out
}

/// Streaming as-of lookup over sorted observations.
///
/// Dates must be queried in non-decreasing order. The value at a date is the
/// most recent observation at or before it; before the first observation
/// there is no value.
#[derive(Debug)]
pub struct ForwardFill<'a> {
    observations: &'a [Observation],
    next: usize,
    last: Option<f64>,
}

impl<'a> ForwardFill<'a> {
    /// Creates a filler over observations sorted by date.
    #[must_use]
    pub const fn new(observations: &'a [Observation]) -> Self {
        Self {
            observations,
            next: 0,
            last: None,
        }
    }

    /// Returns the value in effect at `date`.
    pub fn value_at(&mut self, date: NaiveDate) -> Option<f64> {
        while let Some(obs) = self.observations.get(self.next) {
            if obs.date > date {
                break;
            }
            self.last = Some(obs.value);
            self.next += 1;
        }
        self.last
    }
}

/// Forward-fills sorted observations onto a sorted calendar.
#[must_use]
pub fn forward_fill(observations: &[Observation], calendar: &[NaiveDate]) -> Vec<Option<f64>> {
    let mut filler = ForwardFill::new(observations);
    calendar.iter().map(|&d| filler.value_at(d)).collect()
}
