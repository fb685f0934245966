//! VWAP (Volume-Weighted Average Price), cumulative from the first bar.
//!
//! VWAP[i] = sum(TP * V) / sum(V) over bars 0..=i, with TP = (H + L + C) / 3.
//! Undefined while cumulative volume is zero.

use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_vwap(bars: &[OhlcvBar]) -> Vec<Option<f64>> {
    bars.iter()
        .scan((0.0, 0.0), |(cum_pv, cum_vol), bar| {
            *cum_pv += bar.typical_price() * bar.volume;
            *cum_vol += bar.volume;
            Some(if *cum_vol == 0.0 {
                None
            } else {
                Some(*cum_pv / *cum_vol)
            })
        })
        .collect()
}
