//! Cross-sectional market records and the feature derivation that feeds insight scoring.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::numeric::sample_std;
use crate::ports::price_port::PriceSource;

/// Raw per-asset record as handed over by a market snapshot source.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_24h: Option<f64>,
    pub price_change_7d: Option<f64>,
    /// Short trailing price path, oldest first.
    pub sparkline: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketFeatureRow {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub momentum_24h: f64,
    pub momentum_7d: f64,
    pub trend_strength: f64,
    pub volatility_score: f64,
    pub volume_to_mcap: f64,
}

impl MarketFeatureRow {
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        let momentum_24h = snapshot.price_change_24h.unwrap_or(0.0);
        let momentum_7d = snapshot.price_change_7d.unwrap_or(0.0);
        let volume_to_mcap = if snapshot.market_cap > 0.0 {
            snapshot.total_volume / snapshot.market_cap
        } else {
            0.0
        };

        MarketFeatureRow {
            id: snapshot.id.clone(),
            symbol: snapshot.symbol.clone(),
            name: snapshot.name.clone(),
            current_price: snapshot.current_price,
            market_cap: snapshot.market_cap,
            total_volume: snapshot.total_volume,
            momentum_24h,
            momentum_7d,
            trend_strength: trend_strength(momentum_24h, momentum_7d),
            volatility_score: volatility_score(&snapshot.sparkline),
            volume_to_mcap,
        }
    }
}

pub fn compute_features(snapshots: &[MarketSnapshot]) -> Vec<MarketFeatureRow> {
    snapshots.iter().map(MarketFeatureRow::from_snapshot).collect()
}

pub fn trend_strength(momentum_24h: f64, momentum_7d: f64) -> f64 {
    0.4 * momentum_24h + 0.6 * momentum_7d
}

/// `std(returns) * sqrt(n) * 100` over the simple returns of `prices`.
///
/// Paths shorter than three points score 0.0. Returns off a zero price are
/// not finite and are dropped.
pub fn volatility_score(prices: &[f64]) -> f64 {
    if prices.len() < 3 {
        return 0.0;
    }

    let returns: Vec<f64> = prices
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .filter(|r| r.is_finite())
        .collect();

    match sample_std(&returns) {
        Some(std) => std * (returns.len() as f64).sqrt() * 100.0,
        None => 0.0,
    }
}

/// Market-wide fear & greed reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    /// 0 = extreme fear, 100 = extreme greed.
    pub value: f64,
    pub classification: String,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Sentiment {
            value: 50.0,
            classification: "Neutral".to_string(),
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Current prices indexed by upper-cased symbol.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    prices: HashMap<String, f64>,
}

impl PriceBook {
    pub fn from_rows(rows: &[MarketFeatureRow]) -> Self {
        let mut book = Self::default();
        for row in rows {
            book.insert(&row.symbol, row.current_price);
        }
        book
    }

    pub fn insert(&mut self, symbol: &str, price: f64) {
        self.prices.insert(symbol.to_uppercase(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceSource for PriceBook {
    fn current_price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(&symbol.to_uppercase()).copied()
    }
}
