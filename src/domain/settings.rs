//! Run settings assembled from configuration and command-line overrides.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::preset::RiskPreset;

pub const DEFAULT_QUOTE: &str = "usd";
pub const DEFAULT_UNIVERSE_SIZE: usize = 40;
pub const DEFAULT_HEATMAP_SIZE: usize = 8;
pub const DEFAULT_HISTORY_DAYS: u32 = 14;
pub const DEFAULT_HEATMAP_DAYS: u32 = 7;
pub const DEFAULT_PRESET: &str = "Intraday Alpha";
pub const DEFAULT_ACCOUNT_SIZE: f64 = 15_000.0;
pub const DEFAULT_EXECUTION_MODE: &str = "Paper";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Csv,
    Fixture,
}

impl FromStr for DataSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(DataSourceKind::Csv),
            "fixture" => Ok(DataSourceKind::Fixture),
            other => Err(format!("unknown data source '{other}' (expected csv or fixture)")),
        }
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceKind::Csv => write!(f, "csv"),
            DataSourceKind::Fixture => write!(f, "fixture"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSettings {
    pub source: DataSourceKind,
    /// Only read when `source` is [`DataSourceKind::Csv`].
    pub data_dir: Option<PathBuf>,
    pub quote: String,
    pub universe_size: usize,
    pub heatmap_size: usize,
    pub history_days: u32,
    pub heatmap_days: u32,
}

impl Default for MarketSettings {
    fn default() -> Self {
        MarketSettings {
            source: DataSourceKind::Fixture,
            data_dir: None,
            quote: DEFAULT_QUOTE.to_string(),
            universe_size: DEFAULT_UNIVERSE_SIZE,
            heatmap_size: DEFAULT_HEATMAP_SIZE,
            history_days: DEFAULT_HISTORY_DAYS,
            heatmap_days: DEFAULT_HEATMAP_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanSettings {
    pub preset: RiskPreset,
    pub account_size: f64,
    pub max_positions: usize,
    pub execution_mode: String,
}

/// Command-line values that take precedence over the `[planner]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanOverrides {
    pub preset: Option<String>,
    pub account_size: Option<f64>,
    pub max_positions: Option<usize>,
    pub execution_mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_source_kind() {
        assert_eq!("CSV".parse::<DataSourceKind>(), Ok(DataSourceKind::Csv));
        assert_eq!(" fixture ".parse::<DataSourceKind>(), Ok(DataSourceKind::Fixture));
        assert!("coingecko".parse::<DataSourceKind>().is_err());
    }

    #[test]
    fn defaults() {
        let settings = MarketSettings::default();
        assert_eq!(settings.source, DataSourceKind::Fixture);
        assert_eq!(settings.quote, "usd");
        assert_eq!(settings.heatmap_size, 8);
        assert_eq!(settings.source.to_string(), "fixture");
    }
}
