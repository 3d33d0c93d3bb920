//! Info command implementation.
//!
//! This module handles displaying catalog details for one series.

use anyhow::{Context, Result};
use macrolens_lib::prelude::*;

/// Show catalog details for a series.
pub(crate) fn show_info(id: &str) -> Result<()> {
    let catalog = SeriesCatalog::global();
    let indicator = catalog
        .get(id)
        .with_context(|| format!("Unknown series: {id}"))?;

    println!("Series:      {}", indicator.name());
    println!("ID:          {}", indicator.id());
    println!("Source:      {}", indicator.source());
    println!("Description: {}", indicator.description());
    println!("Unit:        {}", indicator.unit());
    if let Some(frequency) = indicator.frequency() {
        println!("Frequency:   {frequency}");
    }
    if !indicator.is_unscaled() {
        println!("Scale:       raw values divided by {}", indicator.scale());
    }

    Ok(())
}
