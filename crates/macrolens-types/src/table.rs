//! Date-indexed table of fully populated columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TableError;

/// A named column of values aligned with the table index.
#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<f64>,
}

/// Consolidated table produced by aggregation and extended by derivation.
///
/// Every row holds a value for every column. Tables are built once and never
/// mutated in place: adding a column or dropping rows yields a new table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsolidatedTable {
    index: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl ConsolidatedTable {
    /// Creates a table with the given index and no columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not strictly increasing.
    pub fn new(index: Vec<NaiveDate>) -> Result<Self, TableError> {
        if let Some(w) = index.windows(2).find(|w| w[0] >= w[1]) {
            return Err(TableError::UnsortedIndex(w[1]));
        }
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    /// Returns a new table with `values` appended as column `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken, the length does not match the
    /// index, or a value is NaN.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        if let Some(pos) = values.iter().position(|v| v.is_nan()) {
            return Err(TableError::MissingValue {
                name,
                date: self.index[pos],
            });
        }
        self.columns.push(Column { name, values });
        Ok(self)
    }

    /// Returns a new table keeping only rows whose flag in `keep` is true.
    ///
    /// Rows past the end of `keep` are dropped.
    #[must_use]
    pub fn retain_rows(self, keep: &[bool]) -> Self {
        let flag = |i: usize| keep.get(i).copied().unwrap_or(false);
        let index = self
            .index
            .into_iter()
            .enumerate()
            .filter(|(i, _)| flag(*i))
            .map(|(_, d)| d)
            .collect();
        let columns = self
            .columns
            .into_iter()
            .map(|c| Column {
                name: c.name,
                values: c
                    .values
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| flag(*i))
                    .map(|(_, v)| v)
                    .collect(),
            })
            .collect();
        Self { index, columns }
    }

    /// Returns the date index.
    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns true if a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Returns the values of a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Returns the value of a column at a date.
    #[must_use]
    pub fn value(&self, name: &str, date: NaiveDate) -> Option<f64> {
        let row = self.index.binary_search(&date).ok()?;
        self.column(name).map(|values| values[row])
    }

    /// Returns the row at position `i` as its date and values in column order.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<(NaiveDate, Vec<f64>)> {
        let date = *self.index.get(i)?;
        Some((date, self.columns.iter().map(|c| c.values[i]).collect()))
    }

    /// Returns an iterator over all rows.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, Vec<f64>)> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }

    /// Returns the last row as a named record.
    #[must_use]
    pub fn latest(&self) -> Option<Snapshot> {
        let last = self.len().checked_sub(1)?;
        let (as_of, values) = self.row(last)?;
        let readings = self
            .column_names()
            .zip(values)
            .map(|(name, value)| Reading {
                name: name.to_string(),
                value,
            })
            .collect();
        Some(Snapshot { as_of, readings })
    }
}

/// A single named value of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Column name.
    pub name: String,
    /// Value at the snapshot date.
    pub value: f64,
}

/// The latest row of a table as an ordered named record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Date of the row.
    pub as_of: NaiveDate,
    /// Values in column order.
    pub readings: Vec<Reading>,
}

impl Snapshot {
    /// Returns the value of a named reading.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.readings
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value)
    }

    /// Returns an iterator over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.readings.iter().map(|r| (r.name.as_str(), r.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> ConsolidatedTable {
        ConsolidatedTable::new(vec![date(2023, 1, 1), date(2024, 1, 1)])
            .unwrap()
            .with_column("Revenue", vec![1000.0, 1200.0])
            .unwrap()
            .with_column("Interest", vec![900.0, 1200.0])
            .unwrap()
    }

    #[test]
    fn test_unsorted_index_rejected() {
        let result = ConsolidatedTable::new(vec![date(2024, 1, 1), date(2023, 1, 1)]);
        assert!(matches!(result, Err(TableError::UnsortedIndex(_))));
    }

    #[test]
    fn test_column_shape_checks() {
        let table = sample();
        assert!(matches!(
            table.clone().with_column("Revenue", vec![1.0, 2.0]),
            Err(TableError::DuplicateColumn(_))
        ));
        assert!(matches!(
            table.clone().with_column("Medicare", vec![1.0]),
            Err(TableError::LengthMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(matches!(
            table.with_column("Medicare", vec![1.0, f64::NAN]),
            Err(TableError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_value_lookup() {
        let table = sample();
        assert_eq!(table.value("Interest", date(2023, 1, 1)), Some(900.0));
        assert_eq!(table.value("Interest", date(2023, 6, 1)), None);
        assert_eq!(table.value("Medicaid", date(2023, 1, 1)), None);
    }

    #[test]
    fn test_retain_rows() {
        let table = sample().retain_rows(&[false, true]);
        assert_eq!(table.index(), &[date(2024, 1, 1)]);
        assert_eq!(table.column("Revenue"), Some(&[1200.0][..]));
    }

    #[test]
    fn test_latest_snapshot() {
        let snapshot = sample().latest().unwrap();
        assert_eq!(snapshot.as_of, date(2024, 1, 1));
        assert_eq!(snapshot.get("Revenue"), Some(1200.0));
        let names: Vec<_> = snapshot.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Revenue", "Interest"]);
    }

    #[test]
    fn test_empty_table_has_no_snapshot() {
        let table = ConsolidatedTable::new(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert!(table.latest().is_none());
    }
}
