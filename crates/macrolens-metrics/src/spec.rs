//! Metric specifications.

use std::sync::Arc;

use chrono::NaiveDate;

/// Row-wise compute function: input values of one row, in declared order.
pub type RowFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Columnar compute function: the table's date index and whole input columns,
/// in declared order.
///
/// Returns one value per row; `None` marks rows the metric cannot define,
/// such as the warm-up of a look-back.
pub type ColumnFn = Arc<dyn Fn(&[NaiveDate], &[&[f64]]) -> Vec<Option<f64>> + Send + Sync>;

/// How a metric is computed.
#[derive(Clone)]
pub enum Compute {
    /// Independently for each row.
    Row(RowFn),
    /// Over whole columns at once.
    Columns(ColumnFn),
}

impl std::fmt::Debug for Compute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row(_) => f.write_str("Row"),
            Self::Columns(_) => f.write_str("Columns"),
        }
    }
}

/// A named derived metric and the columns it reads.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    name: String,
    inputs: Vec<String>,
    compute: Compute,
}

impl MetricSpec {
    /// Creates a metric computed row by row.
    ///
    /// # Example
    ///
    /// ```
    /// use macrolens_metrics::MetricSpec;
    ///
    /// let spread = MetricSpec::row_wise("Spread", ["Long", "Short"], |v| v[0] - v[1]);
    /// assert_eq!(spread.inputs(), ["Long", "Short"]);
    /// ```
    pub fn row_wise<I, S, F>(name: impl Into<String>, inputs: I, compute: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            compute: Compute::Row(Arc::new(compute)),
        }
    }

    /// Creates a metric computed over whole columns.
    pub fn columnar<I, S, F>(name: impl Into<String>, inputs: I, compute: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[NaiveDate], &[&[f64]]) -> Vec<Option<f64>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            compute: Compute::Columns(Arc::new(compute)),
        }
    }

    /// Returns the metric name, which becomes its column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared input columns.
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Returns the compute function.
    #[must_use]
    pub const fn compute(&self) -> &Compute {
        &self.compute
    }
}
