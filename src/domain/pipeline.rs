//! End-to-end orchestration over the data ports: per-asset analysis,
//! cross-sectional insights, and the multi-asset consensus heatmap.

use rayon::prelude::*;
use serde::Serialize;

use crate::domain::consensus::{aggregate_symbol_score, ConsensusSummary};
use crate::domain::error::SignalError;
use crate::domain::indicator::{with_indicators, EnrichedSeries};
use crate::domain::insight::{rank_insights, Insight};
use crate::domain::market::{compute_features, MarketFeatureRow, MarketSnapshot, Sentiment};
use crate::domain::numeric::round_to;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::signal::{run_default_suite, BotSignal};
use crate::ports::market_port::MarketDataPort;
use crate::ports::sentiment_port::SentimentPort;

/// Everything derived for one asset from its OHLCV history.
#[derive(Debug, Clone)]
pub struct AssetSnapshot {
    pub symbol: String,
    pub series: EnrichedSeries,
    /// Bot verdicts in evaluation order.
    pub signals: Vec<BotSignal>,
    pub summary: ConsensusSummary,
}

pub fn build_asset_snapshot(symbol: &str, bars: &[OhlcvBar]) -> Result<AssetSnapshot, SignalError> {
    if bars.is_empty() {
        return Err(SignalError::NoData {
            symbol: symbol.to_string(),
        });
    }

    let series = with_indicators(bars);
    let signals = run_default_suite(symbol, &series);
    let summary = aggregate_symbol_score(&signals);

    Ok(AssetSnapshot {
        symbol: symbol.to_string(),
        series,
        signals,
        summary,
    })
}

pub fn analyze_asset<M: MarketDataPort + ?Sized>(
    market: &M,
    asset_id: &str,
    symbol: &str,
    quote: &str,
    days: u32,
) -> Result<AssetSnapshot, SignalError> {
    let bars = market.fetch_ohlcv(asset_id, quote, days)?;
    tracing::debug!(asset_id, bars = bars.len(), "fetched ohlcv");
    build_asset_snapshot(symbol, &bars)
}

#[derive(Debug, Clone)]
pub struct MarketInsights {
    pub features: Vec<MarketFeatureRow>,
    pub sentiment: Sentiment,
    /// Score descending.
    pub insights: Vec<Insight>,
}

/// Score the top `universe_size` assets against the current sentiment.
///
/// An unavailable sentiment reading degrades to neutral instead of failing
/// the run; a failing universe fetch is an error.
pub fn build_market_insights(
    market: &dyn MarketDataPort,
    sentiment: &dyn SentimentPort,
    quote: &str,
    universe_size: usize,
) -> Result<MarketInsights, SignalError> {
    let universe = market.fetch_universe(quote, universe_size)?;
    let sentiment = sentiment.fetch_sentiment().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "sentiment unavailable, using neutral reading");
        Sentiment::neutral()
    });

    let features = compute_features(&universe);
    let insights = rank_insights(&features, sentiment.value);
    tracing::info!(
        assets = features.len(),
        sentiment = sentiment.value,
        "scored market insights"
    );

    Ok(MarketInsights {
        features,
        sentiment,
        insights,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub symbol: String,
    pub name: String,
    pub aggregate_score: f64,
    pub buy_votes: usize,
}

/// Consensus per asset across `assets`, evaluated in parallel.
///
/// Assets whose history cannot be fetched or is empty are skipped with a
/// warning. Rows are ordered by aggregate score descending; ties keep the
/// order of `assets`.
pub fn build_heatmap<M>(
    market: &M,
    assets: &[MarketSnapshot],
    quote: &str,
    days: u32,
) -> Vec<HeatmapRow>
where
    M: MarketDataPort + Sync + ?Sized,
{
    let mut rows: Vec<HeatmapRow> = assets
        .par_iter()
        .filter_map(|asset| {
            let symbol = asset.symbol.to_uppercase();
            match analyze_asset(market, &asset.id, &symbol, quote, days) {
                Ok(snapshot) => Some(HeatmapRow {
                    symbol,
                    name: asset.name.clone(),
                    aggregate_score: round_to(snapshot.summary.aggregate_score, 2),
                    buy_votes: snapshot.summary.buy_votes,
                }),
                Err(err) => {
                    tracing::warn!(asset = %asset.id, error = %err, "skipping asset in heatmap");
                    None
                }
            }
        })
        .collect();

    rows.sort_by(|a, b| b.aggregate_score.total_cmp(&a.aggregate_score));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StubMarket {
        series: HashMap<String, Vec<OhlcvBar>>,
        universe: Vec<MarketSnapshot>,
    }

    impl MarketDataPort for StubMarket {
        fn fetch_ohlcv(
            &self,
            asset_id: &str,
            _quote: &str,
            _days: u32,
        ) -> Result<Vec<OhlcvBar>, SignalError> {
            self.series
                .get(asset_id)
                .cloned()
                .ok_or_else(|| SignalError::data_source(format!("no series for {asset_id}")))
        }

        fn fetch_universe(
            &self,
            _quote: &str,
            size: usize,
        ) -> Result<Vec<MarketSnapshot>, SignalError> {
            Ok(self.universe.iter().take(size).cloned().collect())
        }
    }

    struct FailingSentiment;

    impl SentimentPort for FailingSentiment {
        fn fetch_sentiment(&self) -> Result<Sentiment, SignalError> {
            Err(SignalError::data_source("offline"))
        }
    }

    fn bars(closes: &[f64]) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| OhlcvBar {
                timestamp: i as i64 * 3600,
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 1000.0,
            })
            .collect()
    }

    fn snapshot(id: &str, symbol: &str, cap: f64) -> MarketSnapshot {
        MarketSnapshot {
            id: id.into(),
            symbol: symbol.into(),
            name: id.to_uppercase(),
            current_price: 10.0,
            market_cap: cap,
            total_volume: cap / 50.0,
            price_change_24h: Some(1.0),
            price_change_7d: Some(2.0),
            sparkline: vec![9.0, 9.5, 10.0],
        }
    }

    #[test]
    fn empty_series_is_no_data() {
        let err = build_asset_snapshot("BTC", &[]).unwrap_err();
        assert!(matches!(err, SignalError::NoData { ref symbol } if symbol == "BTC"));
    }

    #[test]
    fn snapshot_runs_all_bots() {
        let snap = build_asset_snapshot("ETH", &bars(&[10.0, 11.0, 12.0])).unwrap();
        assert_eq!(snap.signals.len(), 3);
        assert_eq!(snap.series.len(), 3);
        let mean = snap.signals.iter().map(|s| s.score).sum::<f64>() / 3.0;
        assert_eq!(snap.summary.aggregate_score, mean);
    }

    #[test]
    fn heatmap_skips_failures_and_sorts() {
        let mut series = HashMap::new();
        let rising: Vec<f64> = (0..40)
            .map(|i| 100.0 + i as f64 * 2.0 - if i % 3 == 1 { 3.0 } else { 0.0 })
            .collect();
        series.insert("up".to_string(), bars(&rising));
        series.insert("flat".to_string(), bars(&[50.0; 5]));
        series.insert("empty".to_string(), Vec::new());
        let market = StubMarket {
            series,
            universe: Vec::new(),
        };

        let assets = vec![
            snapshot("flat", "flt", 3.0),
            snapshot("missing", "mis", 2.0),
            snapshot("up", "up", 1.0),
            snapshot("empty", "emp", 0.5),
        ];
        let rows = build_heatmap(&market, &assets, "usd", 7);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].aggregate_score >= rows[1].aggregate_score);
        for row in &rows {
            assert_eq!(row.aggregate_score, round_to(row.aggregate_score, 2));
            assert_eq!(row.symbol, row.symbol.to_uppercase());
        }
    }

    #[test]
    fn insights_fall_back_to_neutral_sentiment() {
        let market = StubMarket {
            series: HashMap::new(),
            universe: vec![snapshot("a", "aaa", 10.0), snapshot("b", "bbb", 5.0)],
        };
        let result = build_market_insights(&market, &FailingSentiment, "usd", 1).unwrap();
        assert_eq!(result.sentiment, Sentiment::neutral());
        assert_eq!(result.insights.len(), 1);
        assert_eq!(result.insights[0].symbol, "AAA");
    }
}
