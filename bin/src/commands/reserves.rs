//! Reserves command implementation.

use crate::commands::Context;
use crate::display::spinner;
use anyhow::{Context as _, Result};

/// Print the latest total reserves of a country.
pub(crate) async fn show_reserves(ctx: &Context, country: &str) -> Result<()> {
    let progress = spinner(ctx.quiet, format!("Fetching {country} reserves..."));
    let reserves = ctx.lookups().reserves(country).await;
    progress.finish_and_clear();
    let reserves = reserves.with_context(|| format!("No reserves data for {country}"))?;

    println!(
        "{} Total Reserves ({}): ${:.2} Trillion",
        reserves.country, reserves.year, reserves.trillions
    );
    Ok(())
}
