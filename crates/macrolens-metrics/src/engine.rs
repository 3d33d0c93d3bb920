//! Ordered evaluation of metric specs over a consolidated table.

use std::collections::HashSet;
use std::str::FromStr;

use macrolens_types::ConsolidatedTable;
use tracing::{debug, warn};

use crate::{Compute, MetricError, MetricSpec};

/// What to do when one metric cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DerivePolicy {
    /// Fail the whole derivation.
    #[default]
    Abort,
    /// Record the failure and continue with the next metric.
    Skip,
}

impl DerivePolicy {
    /// Returns the policy as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

impl std::fmt::Display for DerivePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DerivePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(format!("unknown policy {s:?}, expected abort or skip")),
        }
    }
}

/// A metric that was skipped under [`DerivePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFailure {
    /// Metric name.
    pub metric: String,
    /// Why it was skipped.
    pub error: MetricError,
}

/// Output of a derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    /// Input table with one column appended per computed metric.
    pub table: ConsolidatedTable,
    /// Metrics that could not be computed.
    pub failures: Vec<MetricFailure>,
}

/// Evaluates metric specs in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricEngine {
    policy: DerivePolicy,
}

impl MetricEngine {
    /// Creates an engine with the given policy.
    #[must_use]
    pub const fn new(policy: DerivePolicy) -> Self {
        Self { policy }
    }

    /// Returns the failure policy.
    #[must_use]
    pub const fn policy(&self) -> DerivePolicy {
        self.policy
    }

    /// Checks that every input is a declared column or an earlier metric.
    ///
    /// This catches specs that can never be satisfied, whatever the upstream
    /// data, and is meant to run once before any fetching.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::UndeclaredInput`] for the first such input, or
    /// [`MetricError::DuplicateName`] if a metric reuses a name.
    pub fn validate<'a>(
        specs: &[MetricSpec],
        declared: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), MetricError> {
        let mut known: HashSet<&str> = declared.into_iter().collect();
        for spec in specs {
            if let Some(column) = spec.inputs().iter().find(|c| !known.contains(c.as_str())) {
                return Err(MetricError::UndeclaredInput {
                    metric: spec.name().to_string(),
                    column: column.clone(),
                });
            }
            if !known.insert(spec.name()) {
                return Err(MetricError::DuplicateName(spec.name().to_string()));
            }
        }
        Ok(())
    }

    /// Evaluates `specs` in order, appending each result to the table.
    ///
    /// Each metric sees the columns appended by the metrics before it.
    /// Rows a metric leaves undefined are dropped from the result, so every
    /// row stays fully populated.
    ///
    /// # Errors
    ///
    /// Under [`DerivePolicy::Abort`], returns the first metric error. Under
    /// [`DerivePolicy::Skip`], metric errors are collected in
    /// [`Derivation::failures`] instead.
    pub fn derive(
        &self,
        table: ConsolidatedTable,
        specs: &[MetricSpec],
    ) -> Result<Derivation, MetricError> {
        let mut table = table;
        let mut failures = Vec::new();

        for spec in specs {
            match evaluate(&table, spec) {
                Ok(values) => table = append(table, spec.name(), values)?,
                Err(error) => match self.policy {
                    DerivePolicy::Abort => return Err(error),
                    DerivePolicy::Skip => {
                        warn!(metric = spec.name(), %error, "skipping metric");
                        failures.push(MetricFailure {
                            metric: spec.name().to_string(),
                            error,
                        });
                    }
                },
            }
        }

        Ok(Derivation { table, failures })
    }
}

/// Computes one metric; `None` marks undefined rows, including NaN and
/// infinite results.
fn evaluate(table: &ConsolidatedTable, spec: &MetricSpec) -> Result<Vec<Option<f64>>, MetricError> {
    if table.has_column(spec.name()) {
        return Err(MetricError::DuplicateName(spec.name().to_string()));
    }
    let inputs = spec
        .inputs()
        .iter()
        .map(|column| {
            table
                .column(column)
                .ok_or_else(|| MetricError::MissingDependency {
                    metric: spec.name().to_string(),
                    column: column.clone(),
                })
        })
        .collect::<Result<Vec<&[f64]>, _>>()?;

    let values: Vec<Option<f64>> = match spec.compute() {
        Compute::Row(f) => {
            let mut row = vec![0.0; inputs.len()];
            (0..table.len())
                .map(|i| {
                    for (slot, column) in row.iter_mut().zip(&inputs) {
                        *slot = column[i];
                    }
                    Some(f(row.as_slice())).filter(|v| v.is_finite())
                })
                .collect()
        }
        Compute::Columns(f) => {
            let values = f(table.index(), inputs.as_slice());
            if values.len() != table.len() {
                return Err(MetricError::Table(macrolens_types::TableError::LengthMismatch {
                    name: spec.name().to_string(),
                    expected: table.len(),
                    actual: values.len(),
                }));
            }
            values
                .into_iter()
                .map(|v| v.filter(|v| v.is_finite()))
                .collect()
        }
    };

    let defined = values.iter().filter(|v| v.is_some()).count();
    if defined == 0 && !table.is_empty() {
        return Err(match spec.compute() {
            Compute::Row(_) => MetricError::Undefined(spec.name().to_string()),
            Compute::Columns(_) => MetricError::InsufficientHistory {
                metric: spec.name().to_string(),
                rows: table.len(),
            },
        });
    }
    debug!(metric = spec.name(), defined, rows = table.len(), "computed");
    Ok(values)
}

/// Appends a computed column, first dropping the rows it leaves undefined.
fn append(
    table: ConsolidatedTable,
    name: &str,
    values: Vec<Option<f64>>,
) -> Result<ConsolidatedTable, MetricError> {
    let keep: Vec<bool> = values.iter().map(Option::is_some).collect();
    let table = if keep.contains(&false) {
        let dropped = keep.iter().filter(|k| !**k).count();
        debug!(metric = name, dropped, "dropping undefined rows");
        table.retain_rows(&keep)
    } else {
        table
    };
    let values = values.into_iter().flatten().collect();
    Ok(table.with_column(name, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(columns: &[(&str, &[f64])]) -> ConsolidatedTable {
        let n = columns.first().map_or(0, |(_, v)| v.len());
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let index = (0..n).map(|i| start + chrono::Days::new(i as u64)).collect();
        columns
            .iter()
            .fold(ConsolidatedTable::new(index).unwrap(), |t, (name, v)| {
                t.with_column(*name, v.to_vec()).unwrap()
            })
    }

    fn sum() -> MetricSpec {
        MetricSpec::row_wise("Sum", ["a", "b"], |v| v[0] + v[1])
    }

    #[test]
    fn test_later_metric_reads_earlier() {
        let specs = [sum(), MetricSpec::row_wise("Double", ["Sum"], |v| v[0] * 2.0)];
        let out = MetricEngine::default()
            .derive(table(&[("a", &[1.0, 2.0]), ("b", &[3.0, 4.0])]), &specs)
            .unwrap();
        assert_eq!(out.table.column("Double").unwrap(), &[8.0, 12.0]);
        let names: Vec<_> = out.table.column_names().collect();
        assert_eq!(names, ["a", "b", "Sum", "Double"]);
    }

    #[test]
    fn test_inputs_untouched() {
        let input = table(&[("a", &[1.0]), ("b", &[2.0])]);
        let out = MetricEngine::default().derive(input.clone(), &[sum()]).unwrap();
        assert_eq!(out.table.column("a"), input.column("a"));
        assert_eq!(out.table.column("b"), input.column("b"));
    }

    #[test]
    fn test_missing_dependency_aborts() {
        let err = MetricEngine::new(DerivePolicy::Abort)
            .derive(table(&[("a", &[1.0])]), &[sum()])
            .unwrap_err();
        assert_eq!(
            err,
            MetricError::MissingDependency {
                metric: "Sum".into(),
                column: "b".into()
            }
        );
    }

    #[test]
    fn test_missing_dependency_skips_dependents() {
        let specs = [
            sum(),
            MetricSpec::row_wise("Double", ["Sum"], |v| v[0] * 2.0),
            MetricSpec::row_wise("Neg", ["a"], |v| -v[0]),
        ];
        let out = MetricEngine::new(DerivePolicy::Skip)
            .derive(table(&[("a", &[1.0])]), &specs)
            .unwrap();
        let failed: Vec<_> = out.failures.iter().map(|f| f.metric.as_str()).collect();
        assert_eq!(failed, ["Sum", "Double"]);
        assert_eq!(out.table.column("Neg").unwrap(), &[-1.0]);
    }

    #[test]
    fn test_forward_reference_is_missing() {
        // "Later" is computed after "Early", so Early cannot read it.
        let specs = [
            MetricSpec::row_wise("Early", ["Later"], |v| v[0]),
            MetricSpec::row_wise("Later", ["a"], |v| v[0]),
        ];
        let err = MetricEngine::default()
            .derive(table(&[("a", &[1.0])]), &specs)
            .unwrap_err();
        assert!(matches!(err, MetricError::MissingDependency { column, .. } if column == "Later"));
    }

    #[test]
    fn test_validate() {
        assert!(MetricEngine::validate(&[sum()], ["a", "b"]).is_ok());
        assert_eq!(
            MetricEngine::validate(&[sum()], ["a"]),
            Err(MetricError::UndeclaredInput {
                metric: "Sum".into(),
                column: "b".into()
            })
        );
        assert_eq!(
            MetricEngine::validate(&[sum()], ["a", "b", "Sum"]),
            Err(MetricError::DuplicateName("Sum".into()))
        );
    }

    #[test]
    fn test_columnar_drops_warm_up() {
        let diff = MetricSpec::columnar("Diff", ["a"], |_, cols| {
            let a = cols[0];
            (0..a.len())
                .map(|i| i.checked_sub(1).map(|j| a[i] - a[j]))
                .collect()
        });
        let out = MetricEngine::default()
            .derive(table(&[("a", &[1.0, 4.0, 9.0])]), &[diff])
            .unwrap();
        assert_eq!(out.table.len(), 2);
        assert_eq!(out.table.column("a").unwrap(), &[4.0, 9.0]);
        assert_eq!(out.table.column("Diff").unwrap(), &[3.0, 5.0]);
    }

    #[test]
    fn test_columnar_insufficient_history() {
        let never = MetricSpec::columnar("Never", ["a"], |_, cols| vec![None; cols[0].len()]);
        let err = MetricEngine::default()
            .derive(table(&[("a", &[1.0])]), &[never])
            .unwrap_err();
        assert!(matches!(err, MetricError::InsufficientHistory { rows: 1, .. }));
    }

    #[test]
    fn test_nan_rows_dropped() {
        let ratio = MetricSpec::row_wise("Ratio", ["a", "b"], |v| v[0] / v[1]);
        let out = MetricEngine::default()
            .derive(table(&[("a", &[0.0, 1.0]), ("b", &[0.0, 2.0])]), &[ratio])
            .unwrap();
        assert_eq!(out.table.column("Ratio").unwrap(), &[0.5]);
    }

    #[test]
    fn test_infinite_rows_dropped() {
        let ratio = MetricSpec::row_wise("Ratio", ["a", "b"], |v| v[0] / v[1]);
        let out = MetricEngine::default()
            .derive(table(&[("a", &[5.0, 1.0]), ("b", &[0.0, 4.0])]), &[ratio])
            .unwrap();
        assert_eq!(out.table.len(), 1);
        assert_eq!(out.table.column("Ratio").unwrap(), &[0.25]);

        let blowup = MetricSpec::columnar("Blowup", ["a"], |_, cols| {
            cols[0].iter().map(|_| Some(f64::INFINITY)).collect()
        });
        let err = MetricEngine::default()
            .derive(table(&[("a", &[1.0])]), &[blowup])
            .unwrap_err();
        assert!(matches!(err, MetricError::InsufficientHistory { .. }));
    }

    #[test]
    fn test_name_clash_follows_policy() {
        let clash = MetricSpec::row_wise("a", ["a"], |v| v[0]);
        let out = MetricEngine::new(DerivePolicy::Skip)
            .derive(table(&[("a", &[1.0])]), &[clash])
            .unwrap();
        assert_eq!(out.failures[0].error, MetricError::DuplicateName("a".into()));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("SKIP".parse::<DerivePolicy>().unwrap(), DerivePolicy::Skip);
        assert!("retry".parse::<DerivePolicy>().is_err());
        assert_eq!(DerivePolicy::default().to_string(), "abort");
    }
}
