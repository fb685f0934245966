#![allow(dead_code)]

use std::collections::HashMap;

pub use signalpro::domain::error::SignalError;
pub use signalpro::domain::market::{MarketSnapshot, Sentiment};
pub use signalpro::domain::ohlcv::OhlcvBar;
use signalpro::ports::market_port::MarketDataPort;
use signalpro::ports::sentiment_port::SentimentPort;

pub struct MockMarketData {
    pub bars: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub universe: Vec<MarketSnapshot>,
    pub sentiment: Option<Sentiment>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
            errors: HashMap::new(),
            universe: Vec::new(),
            sentiment: None,
        }
    }

    pub fn with_bars(mut self, asset_id: &str, bars: Vec<OhlcvBar>) -> Self {
        self.bars.insert(asset_id.to_string(), bars);
        self
    }

    pub fn with_error(mut self, asset_id: &str, reason: &str) -> Self {
        self.errors.insert(asset_id.to_string(), reason.to_string());
        self
    }

    pub fn with_asset(mut self, snapshot: MarketSnapshot) -> Self {
        self.universe.push(snapshot);
        self
    }

    pub fn with_sentiment(mut self, value: f64) -> Self {
        self.sentiment = Some(Sentiment {
            value,
            classification: "Test".to_string(),
        });
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_ohlcv(
        &self,
        asset_id: &str,
        _quote: &str,
        _days: u32,
    ) -> Result<Vec<OhlcvBar>, SignalError> {
        if let Some(reason) = self.errors.get(asset_id) {
            return Err(SignalError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.bars.get(asset_id).cloned().unwrap_or_default())
    }

    fn fetch_universe(
        &self,
        _quote: &str,
        size: usize,
    ) -> Result<Vec<MarketSnapshot>, SignalError> {
        let mut universe = self.universe.clone();
        universe.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
        universe.truncate(size);
        Ok(universe)
    }
}

impl SentimentPort for MockMarketData {
    fn fetch_sentiment(&self) -> Result<Sentiment, SignalError> {
        self.sentiment.clone().ok_or_else(|| SignalError::DataSource {
            reason: "sentiment offline".to_string(),
        })
    }
}

/// Hourly bars following `closes`, with a 1% range around each close.
pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            timestamp: 1_700_000_000 + i as i64 * 3600,
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume: 1_000.0 + i as f64 * 10.0,
        })
        .collect()
}

/// A steady climb of `step` per bar with a small pullback every third bar.
pub fn generate_uptrend(n: usize, start: f64, step: f64) -> Vec<OhlcvBar> {
    let closes: Vec<f64> = (0..n)
        .map(|i| start + i as f64 * step - if i % 3 == 1 { step * 1.5 } else { 0.0 })
        .collect();
    bars_from_closes(&closes)
}

pub fn make_snapshot(id: &str, symbol: &str, price: f64, market_cap: f64) -> MarketSnapshot {
    MarketSnapshot {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: id.to_string(),
        current_price: price,
        market_cap,
        total_volume: market_cap * 0.05,
        price_change_24h: Some(2.0),
        price_change_7d: Some(8.0),
        sparkline: vec![price * 0.95, price * 0.97, price * 0.99, price],
    }
}
