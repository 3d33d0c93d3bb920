//! Display utilities and output formatting for the macrolens CLI.

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use macrolens_lib::prelude::*;
use macrolens_lib::Report;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Spinner on stderr while upstream calls are in flight; hidden in quiet mode.
pub(crate) fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the latest row of a report as a two-column listing.
pub(crate) fn print_snapshot(report: &Report) {
    let Some(snapshot) = report.snapshot() else {
        println!("No data.");
        return;
    };

    println!(
        "\n--- {} (as of {}) ---",
        report.kind.title(),
        snapshot.as_of.format("%Y-%m-%d")
    );
    for (name, value) in snapshot.iter() {
        println!("{name:<32} {value:>18.4}");
    }
}

/// Print skipped series and metrics to stderr.
pub(crate) fn print_failures(report: &Report) {
    if report.is_complete() {
        return;
    }
    eprintln!("\nUnavailable:");
    for failure in &report.source_failures {
        eprintln!("  [{}] {failure}", failure.kind());
    }
    for failure in &report.metric_failures {
        eprintln!("  [metric] {}: {}", failure.metric, failure.error);
    }
}

/// Write a table to a file, or to stdout when no path is given.
pub(crate) fn write_table(
    table: &ConsolidatedTable,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_with(table, writer, format)
        }
        None if format.is_binary() => bail!("{format} output needs --output"),
        None => write_with(table, BufWriter::new(std::io::stdout()), format),
    }
}

fn write_with<W: Write + Send>(
    table: &ConsolidatedTable,
    mut writer: W,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => CsvFormatter::new().write_table(table, &mut writer)?,
        OutputFormat::Json => JsonFormatter::new()
            .with_pretty(true)
            .write_table(table, &mut writer)?,
        OutputFormat::Ndjson => JsonFormatter::ndjson().write_table(table, &mut writer)?,
        OutputFormat::Parquet => {
            #[cfg(feature = "parquet")]
            {
                macrolens_lib::ParquetFormatter::new().write_table(table, &mut writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                bail!("Parquet support not compiled in");
            }
        }
    }
    writer.flush()?;
    Ok(())
}
