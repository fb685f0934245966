//! ATR (Average True Range).
//!
//! TR[0] = high - low; TR[i] = max(high-low, |high-C[i-1]|, |low-C[i-1]|).
//! ATR is the simple rolling mean of TR. Warmup: first (period-1) rows are undefined.

use crate::domain::indicator::window::{defined, rolling};
use crate::domain::numeric::mean;
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn true_ranges(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| match i {
            0 => bar.high - bar.low,
            _ => bar.true_range(bars[i - 1].close),
        })
        .collect()
}

pub fn calculate_atr(bars: &[OhlcvBar], period: usize) -> Vec<Option<f64>> {
    rolling(&defined(&true_ranges(bars)), period, mean)
}
