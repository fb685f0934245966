//! Technical indicator engine.
//!
//! Each submodule is a pure function over a bar or close slice returning one
//! value per input row. Windowed indicators return `Option<f64>` columns where
//! `None` marks rows without enough history or with a degenerate denominator;
//! recursive ones (EMA, MACD, OBV) are defined from the first row.
//!
//! [`with_indicators`] assembles the fixed column set into an [`EnrichedSeries`].

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod vwap;
pub mod window;

use serde::Serialize;

use crate::domain::ohlcv::{closes, OhlcvBar};
use bollinger::BollingerSeries;
use macd::MacdSeries;
use stochastic::StochasticSeries;

/// OHLCV bars plus every derived column, row-aligned with `bars`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichedSeries {
    pub bars: Vec<OhlcvBar>,
    pub sma_20: Vec<Option<f64>>,
    pub ema_20: Vec<f64>,
    pub rsi_14: Vec<Option<f64>>,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
    pub atr_14: Vec<Option<f64>>,
    pub stochastic: StochasticSeries,
    pub obv: Vec<f64>,
    pub vwap: Vec<Option<f64>>,
}

/// One row of an [`EnrichedSeries`], flattened for rule evaluation and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub sma_20: Option<f64>,
    pub ema_20: f64,
    pub rsi_14: Option<f64>,
    pub macd: f64,
    pub signal: f64,
    pub hist: f64,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub atr_14: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub obv: f64,
    pub vwap: Option<f64>,
}

impl EnrichedSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<IndicatorRow> {
        let bar = self.bars.get(i)?;
        Some(IndicatorRow {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            sma_20: self.sma_20[i],
            ema_20: self.ema_20[i],
            rsi_14: self.rsi_14[i],
            macd: self.macd.line[i],
            signal: self.macd.signal[i],
            hist: self.macd.histogram[i],
            bb_upper: self.bollinger.upper[i],
            bb_middle: self.bollinger.middle[i],
            bb_lower: self.bollinger.lower[i],
            atr_14: self.atr_14[i],
            stoch_k: self.stochastic.k[i],
            stoch_d: self.stochastic.d[i],
            obv: self.obv[i],
            vwap: self.vwap[i],
        })
    }

    pub fn latest(&self) -> Option<IndicatorRow> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }

    /// The row before the latest one, if the series has at least two rows.
    pub fn previous(&self) -> Option<IndicatorRow> {
        self.len().checked_sub(2).and_then(|i| self.row(i))
    }

    pub fn rows(&self) -> impl Iterator<Item = IndicatorRow> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }
}

/// Compute the full indicator set over `bars` with the default parameters.
pub fn with_indicators(bars: &[OhlcvBar]) -> EnrichedSeries {
    let close = closes(bars);

    EnrichedSeries {
        bars: bars.to_vec(),
        sma_20: sma::calculate_sma(&close, sma::DEFAULT_PERIOD),
        ema_20: ema::calculate_ema(&close, ema::DEFAULT_PERIOD),
        rsi_14: rsi::calculate_rsi(&close, rsi::DEFAULT_PERIOD),
        macd: macd::calculate_macd_default(&close),
        bollinger: bollinger::calculate_bollinger(
            &close,
            bollinger::DEFAULT_PERIOD,
            bollinger::DEFAULT_MULTIPLIER,
        ),
        atr_14: atr::calculate_atr(bars, atr::DEFAULT_PERIOD),
        stochastic: stochastic::calculate_stochastic(
            bars,
            stochastic::DEFAULT_PERIOD,
            stochastic::DEFAULT_SMOOTH,
        ),
        obv: obv::calculate_obv(bars),
        vwap: vwap::calculate_vwap(bars),
    }
}
