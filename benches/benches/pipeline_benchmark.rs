//! Aggregation and derivation benchmarks over synthetic series.
//!
//! Run with: `cargo bench --package macrolens-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use macrolens_aggregate::{Calendar, combine};
use macrolens_bench::synthetic_outcomes;
use macrolens_metrics::MetricEngine;
use macrolens_metrics::standard::{columns::*, fiscal_metrics};

const FISCAL_COLUMNS: [&str; 5] = [REVENUE, INTEREST, SOCIAL_SECURITY, MEDICARE, MEDICAID];

/// History lengths in days.
const HISTORIES: [u64; 3] = [365, 5 * 365, 20 * 365];

fn combine_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    for days in HISTORIES {
        group.throughput(Throughput::Elements(days));
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, &days| {
            b.iter_batched(
                || synthetic_outcomes(&FISCAL_COLUMNS, days),
                |outcomes| combine(outcomes, &Calendar::Union),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn derive_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_fiscal");
    let specs = fiscal_metrics();
    let engine = MetricEngine::default();

    for days in HISTORIES {
        let Ok(aggregation) = combine(synthetic_outcomes(&FISCAL_COLUMNS, days), &Calendar::Union)
        else {
            continue;
        };
        group.throughput(Throughput::Elements(aggregation.table.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(days),
            &aggregation.table,
            |b, table| {
                b.iter_batched(
                    || table.clone(),
                    |table| engine.derive(table, &specs),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, combine_benchmark, derive_benchmark);
criterion_main!(benches);
