//! TIC command implementation.

use crate::commands::Context;
use crate::display::spinner;
use anyhow::Result;

/// Print Treasury holdings of the tracked foreign holders.
pub(crate) async fn show_holdings(ctx: &Context) -> Result<()> {
    let progress = spinner(ctx.quiet, "Fetching TIC report...".to_string());
    let holdings = ctx.lookups().tic_holdings().await;
    progress.finish_and_clear();
    let holdings = holdings?;

    if holdings.is_empty() {
        println!("No tracked holders found in the TIC report.");
        return Ok(());
    }

    for holding in &holdings {
        println!(
            "{} US Debt Holdings: ${} Billion",
            holding.holder, holding.billions
        );
    }
    Ok(())
}
