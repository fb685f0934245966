//! Built-in deterministic data set for demos and offline runs.

use crate::domain::error::SignalError;
use crate::domain::market::{MarketSnapshot, Sentiment};
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::market_port::MarketDataPort;
use crate::ports::sentiment_port::SentimentPort;

const FIXTURE_CLOSES: [f64; 11] = [
    61_000.0, 61_800.0, 62_300.0, 62_000.0, 62_800.0, 63_500.0, 64_000.0, 64_500.0, 65_200.0,
    66_100.0, 67_000.0,
];
const FIXTURE_START: i64 = 1_700_000_000;
const BAR_SECONDS: i64 = 3_600;

/// Three-asset universe with an hourly price path per asset.
///
/// Every asset shares the shape of the same 11-bar path, scaled so its last
/// close equals the asset's current price.
#[derive(Debug, Clone)]
pub struct FixtureAdapter {
    universe: Vec<MarketSnapshot>,
    sentiment: Sentiment,
}

impl Default for FixtureAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureAdapter {
    pub fn new() -> Self {
        Self {
            universe: fixture_universe(),
            sentiment: Sentiment::neutral(),
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }
}

#[allow(clippy::too_many_arguments)]
fn snapshot(
    id: &str,
    symbol: &str,
    name: &str,
    price: f64,
    market_cap: f64,
    volume: f64,
    change_24h: f64,
    change_7d: f64,
    sparkline: &[f64],
) -> MarketSnapshot {
    MarketSnapshot {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        current_price: price,
        market_cap,
        total_volume: volume,
        price_change_24h: Some(change_24h),
        price_change_7d: Some(change_7d),
        sparkline: sparkline.to_vec(),
    }
}

fn fixture_universe() -> Vec<MarketSnapshot> {
    vec![
        snapshot(
            "bitcoin",
            "btc",
            "Bitcoin",
            67_000.0,
            1_300_000_000_000.0,
            29_000_000_000.0,
            1.8,
            4.1,
            &[62_500.0, 63_100.0, 63_900.0, 64_200.0, 65_100.0, 66_100.0, 67_000.0],
        ),
        snapshot(
            "ethereum",
            "eth",
            "Ethereum",
            3_300.0,
            390_000_000_000.0,
            16_000_000_000.0,
            2.4,
            6.3,
            &[3_020.0, 3_080.0, 3_120.0, 3_150.0, 3_210.0, 3_260.0, 3_300.0],
        ),
        snapshot(
            "solana",
            "sol",
            "Solana",
            152.0,
            69_000_000_000.0,
            3_200_000_000.0,
            -0.6,
            3.9,
            &[141.0, 144.0, 149.0, 146.0, 150.0, 154.0, 152.0],
        ),
    ]
}

/// The fixture price path scaled by `scale`.
pub fn fixture_bars(scale: f64) -> Vec<OhlcvBar> {
    FIXTURE_CLOSES
        .iter()
        .enumerate()
        .map(|(i, &base)| {
            let close = base * scale;
            OhlcvBar {
                timestamp: FIXTURE_START + i as i64 * BAR_SECONDS,
                open: close * 0.995,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_500.0 + i as f64 * 35.0,
            }
        })
        .collect()
}

impl MarketDataPort for FixtureAdapter {
    fn fetch_ohlcv(
        &self,
        asset_id: &str,
        _quote: &str,
        _days: u32,
    ) -> Result<Vec<OhlcvBar>, SignalError> {
        let asset = self
            .universe
            .iter()
            .find(|s| s.id == asset_id)
            .ok_or_else(|| SignalError::data_source(format!("no fixture data for '{asset_id}'")))?;
        let last = FIXTURE_CLOSES[FIXTURE_CLOSES.len() - 1];
        Ok(fixture_bars(asset.current_price / last))
    }

    fn fetch_universe(
        &self,
        _quote: &str,
        size: usize,
    ) -> Result<Vec<MarketSnapshot>, SignalError> {
        Ok(self.universe.iter().take(size).cloned().collect())
    }
}

impl SentimentPort for FixtureAdapter {
    fn fetch_sentiment(&self) -> Result<Sentiment, SignalError> {
        Ok(self.sentiment.clone())
    }
}
