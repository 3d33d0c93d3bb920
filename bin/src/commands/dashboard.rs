//! Dashboard commands.
//!
//! Runs one dashboard and either prints its latest values or writes the
//! full table.

use crate::commands::Context;
use crate::display::{print_failures, print_snapshot, spinner, write_table};
use anyhow::{Context as _, Result};
use macrolens_lib::prelude::*;
use std::path::PathBuf;

/// Run a dashboard and present the result.
pub(crate) async fn run_dashboard(
    ctx: &Context,
    kind: DashboardKind,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let progress = spinner(ctx.quiet, format!("Fetching {} data...", kind.title()));

    let result = Dashboard::new(kind, &ctx.sources())
        .run(&ctx.settings)
        .await;
    progress.finish_and_clear();
    let report = result.with_context(|| format!("{} dashboard failed", kind.title()))?;

    match format {
        None => print_snapshot(&report),
        Some(format) => {
            write_table(&report.table, output.as_deref(), format)?;
            if let (Some(path), false) = (&output, ctx.quiet) {
                eprintln!("Output written to: {}", path.display());
            }
        }
    }

    print_failures(&report);
    Ok(())
}
