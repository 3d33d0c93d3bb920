//! List command implementation.
//!
//! This module handles listing known series with optional filtering.

use anyhow::{Result, anyhow};
use macrolens_lib::Source;
use macrolens_lib::prelude::*;

/// List known series with optional source filter or search pattern.
pub(crate) fn list_series(source: Option<&str>, search: Option<&str>) -> Result<()> {
    let catalog = SeriesCatalog::global();

    let mut indicators: Vec<_> = match (source, search) {
        (Some(s), _) => {
            let source: Source = s.parse().map_err(|e: String| anyhow!(e))?;
            catalog.by_source(source).collect()
        }
        (_, Some(pattern)) => catalog.search(pattern),
        (None, None) => catalog.all().collect(),
    };
    indicators.sort_by(|a, b| {
        a.source()
            .as_str()
            .cmp(b.source().as_str())
            .then(a.id().cmp(b.id()))
    });

    if indicators.is_empty() {
        println!("No series found.");
        return Ok(());
    }

    println!("{:<28} {:<28} {:<12}", "ID", "NAME", "SOURCE");
    println!("{}", "-".repeat(70));

    for indicator in &indicators {
        println!(
            "{:<28} {:<28} {:<12}",
            indicator.id(),
            indicator.name(),
            indicator.source()
        );
    }

    println!("\nTotal: {} series", indicators.len());
    Ok(())
}
