//! Upstream indicator definitions.

use serde::{Deserialize, Serialize};

use crate::Frequency;

/// Upstream provider an indicator is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// FRED graph CSV endpoint.
    Fred,
    /// Market-data chart feed (futures, indices, crypto).
    Market,
    /// World Bank indicators API.
    WorldBank,
    /// Treasury International Capital text report.
    Tic,
    /// GDELT news document API.
    Gdelt,
}

impl Source {
    /// Returns the source as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fred => "fred",
            Self::Market => "market",
            Self::WorldBank => "world_bank",
            Self::Tic => "tic",
            Self::Gdelt => "gdelt",
        }
    }

    /// Returns all sources.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fred,
            Self::Market,
            Self::WorldBank,
            Self::Tic,
            Self::Gdelt,
        ]
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fred" => Ok(Self::Fred),
            "market" | "yahoo" => Ok(Self::Market),
            "world_bank" | "worldbank" | "wb" => Ok(Self::WorldBank),
            "tic" => Ok(Self::Tic),
            "gdelt" | "news" => Ok(Self::Gdelt),
            _ => Err(format!(
                "unknown source '{s}', expected one of: fred, market, world_bank, tic, gdelt"
            )),
        }
    }
}

const fn unit_scale() -> f64 {
    1.0
}

/// Metadata for a known upstream series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Upstream identifier (FRED series id, ticker, `CC/INDICATOR`).
    id: String,
    /// Human-readable name.
    name: String,
    /// Description of the series.
    description: String,
    /// Provider.
    source: Source,
    /// Native frequency, if the series is a time series.
    #[serde(default)]
    frequency: Option<Frequency>,
    /// Divisor applied to raw upstream values.
    #[serde(default = "unit_scale")]
    scale: f64,
    /// Unit after scaling.
    #[serde(default)]
    unit: String,
}

impl Indicator {
    /// Creates a new indicator.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        source: Source,
        frequency: Option<Frequency>,
        scale: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            source,
            frequency,
            scale,
            unit: unit.into(),
        }
    }

    /// Returns the upstream identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the provider.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Returns the native frequency.
    #[must_use]
    pub const fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// Returns the divisor applied to raw upstream values.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the unit after scaling.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns true if raw values are used as-is.
    #[must_use]
    pub fn is_unscaled(&self) -> bool {
        (self.scale - 1.0).abs() < f64::EPSILON
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_creation() {
        let tnx = Indicator::new(
            "^TNX",
            "10Y Treasury Yield",
            "CBOE 10-year Treasury yield index",
            Source::Market,
            Some(Frequency::Daily),
            100.0,
            "decimal",
        );

        assert_eq!(tnx.id(), "^TNX");
        assert_eq!(tnx.source(), Source::Market);
        assert!(!tnx.is_unscaled());
        assert_eq!(tnx.to_string(), "10Y Treasury Yield (^TNX)");
    }

    #[test]
    fn test_scale_defaults_to_one() {
        let json = r#"{"id":"INDPRO","name":"Industrial Production","description":"","source":"fred"}"#;
        let indicator: Indicator = serde_json::from_str(json).unwrap();
        assert!(indicator.is_unscaled());
        assert_eq!(indicator.frequency(), None);
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("world-bank".parse::<Source>().unwrap(), Source::WorldBank);
        assert!("bloomberg".parse::<Source>().is_err());
    }
}
