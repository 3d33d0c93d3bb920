//! Registry of upstream series known to macrolens.
//!
//! Each entry records where a series comes from, its native frequency and the
//! divisor applied to raw upstream values. Scaling is always looked up here,
//! never inferred from the data.
//!
//! # Example
//!
//! ```
//! use macrolens_catalog::SeriesCatalog;
//!
//! let catalog = SeriesCatalog::global();
//!
//! // Lookup by ID
//! if let Some(indicator) = catalog.get("^TNX") {
//!     println!("{}: divide by {}", indicator.name(), indicator.scale());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/macrolens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use macrolens_types::{Indicator, Source};

/// The series metadata JSON embedded at compile time.
const SERIES_JSON: &str = include_str!("../data/series.json");

/// Global catalog instance.
static CATALOG: OnceLock<SeriesCatalog> = OnceLock::new();

/// Registry of all known upstream series.
#[derive(Debug)]
pub struct SeriesCatalog {
    indicators: HashMap<String, Indicator>,
}

impl SeriesCatalog {
    /// Returns the global catalog.
    ///
    /// The catalog is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        CATALOG.get_or_init(Self::load)
    }

    /// Loads indicators from the embedded JSON data.
    fn load() -> Self {
        let indicators: HashMap<String, Indicator> =
            serde_json::from_str(SERIES_JSON).expect("Invalid series.json");
        Self { indicators }
    }

    /// Looks up an indicator by ID (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Indicator> {
        self.indicators.get(&id.to_lowercase())
    }

    /// Returns the divisor for an ID, or 1.0 when the ID is not cataloged.
    #[must_use]
    pub fn scale_for(&self, id: &str) -> f64 {
        self.get(id).map_or(1.0, Indicator::scale)
    }

    /// Returns all indicators as an iterator.
    pub fn all(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.values()
    }

    /// Returns the total number of indicators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Returns indicators served by the given source.
    pub fn by_source(&self, source: Source) -> impl Iterator<Item = &Indicator> {
        self.indicators
            .values()
            .filter(move |i| i.source() == source)
    }

    /// Searches indicators by name or ID pattern (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&Indicator> {
        let pattern = pattern.to_lowercase();
        self.indicators
            .values()
            .filter(|i| {
                i.id().to_lowercase().contains(&pattern)
                    || i.name().to_lowercase().contains(&pattern)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrolens_types::Frequency;

    #[test]
    fn test_catalog_loads() {
        let catalog = SeriesCatalog::global();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_keys_match_ids() {
        let catalog = SeriesCatalog::global();
        for indicator in catalog.all() {
            let found = catalog.get(indicator.id()).unwrap();
            assert_eq!(found.id(), indicator.id());
        }
    }

    #[test]
    fn test_yield_index_is_divided_by_hundred() {
        let catalog = SeriesCatalog::global();
        assert_eq!(catalog.scale_for("^tnx"), 100.0);
        assert_eq!(catalog.scale_for("CL=F"), 1.0);
        assert_eq!(catalog.scale_for("NOT-A-SERIES"), 1.0);
    }

    #[test]
    fn test_fiscal_series_present() {
        let catalog = SeriesCatalog::global();
        for id in ["W006RC1Q027SBEA", "A091RC1Q027SBEA", "W823RC1", "W824RC1", "W825RC1"] {
            let indicator = catalog.get(id).unwrap();
            assert_eq!(indicator.source(), Source::Fred);
        }
        assert_eq!(
            catalog.get("WALCL").unwrap().frequency(),
            Some(Frequency::Weekly)
        );
    }

    #[test]
    fn test_reserves_in_trillions() {
        let reserves = SeriesCatalog::global().get("CHN/FI.RES.TOTL.CD").unwrap();
        assert_eq!(reserves.source(), Source::WorldBank);
        assert_eq!(reserves.scale(), 1e12);
    }

    #[test]
    fn test_by_source() {
        let catalog = SeriesCatalog::global();
        assert_eq!(catalog.by_source(Source::Tic).count(), 2);
        assert!(catalog.by_source(Source::Market).all(|i| i.frequency().is_some()));
    }

    #[test]
    fn test_search() {
        let catalog = SeriesCatalog::global();
        let results = catalog.search("china");
        assert!(results.iter().any(|i| i.id() == "IMPCH"));
        assert!(results.iter().any(|i| i.id() == "China, Mainland"));
    }
}
