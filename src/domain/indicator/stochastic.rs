//! Stochastic oscillator.
//!
//! %K = 100 * (C - LL(n)) / (HH(n) - LL(n)), undefined when HH == LL.
//! %D = SMA(smooth) of %K, undefined while any %K in its window is undefined.

use crate::domain::indicator::window::{defined, rolling, window_max, window_min};
use crate::domain::numeric::mean;
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;
pub const DEFAULT_SMOOTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

pub fn calculate_stochastic(bars: &[OhlcvBar], period: usize, smooth: usize) -> StochasticSeries {
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lowest = rolling(&defined(&lows), period, window_min);
    let highest = rolling(&defined(&highs), period, window_max);

    let k: Vec<Option<f64>> = bars
        .iter()
        .zip(lowest.iter().zip(&highest))
        .map(|(bar, (lo, hi))| {
            let (lo, hi) = ((*lo)?, (*hi)?);
            let range = hi - lo;
            if range == 0.0 {
                return None;
            }
            Some(100.0 * (bar.close - lo) / range)
        })
        .collect();
    let d = rolling(&k, smooth, mean);

    StochasticSeries { k, d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_bar(high: f64, low: f64, close: f64) -> OhlcvBar {
        OhlcvBar {
            timestamp: 0,
            open: close,
            high,
            low,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn stochastic_basic_values() {
        let bars = vec![
            make_bar(12.0, 8.0, 10.0),
            make_bar(14.0, 9.0, 13.0),
            make_bar(15.0, 10.0, 11.0),
        ];
        let stoch = calculate_stochastic(&bars, 2, 2);
        assert!(stoch.k[0].is_none());
        // window 0..=1: LL=8 HH=14 → 100*(13-8)/6
        assert_relative_eq!(stoch.k[1].unwrap(), 100.0 * 5.0 / 6.0);
        // window 1..=2: LL=9 HH=15 → 100*(11-9)/6
        assert_relative_eq!(stoch.k[2].unwrap(), 100.0 * 2.0 / 6.0);

        assert!(stoch.d[1].is_none());
        assert_relative_eq!(stoch.d[2].unwrap(), 100.0 * 3.5 / 6.0);
    }

    #[test]
    fn stochastic_flat_range_is_undefined() {
        let bars: Vec<OhlcvBar> = (0..5).map(|_| make_bar(10.0, 10.0, 10.0)).collect();
        let stoch = calculate_stochastic(&bars, 3, 2);
        assert!(stoch.k.iter().all(Option::is_none));
        assert!(stoch.d.iter().all(Option::is_none));
    }

    #[test]
    fn stochastic_d_waits_for_defined_k() {
        let bars: Vec<OhlcvBar> = (0..20)
            .map(|i| {
                let c = 100.0 + (i as f64 % 5.0);
                make_bar(c + 1.0, c - 1.0, c)
            })
            .collect();
        let stoch = calculate_stochastic(&bars, DEFAULT_PERIOD, DEFAULT_SMOOTH);
        assert!(stoch.k[12].is_none());
        assert!(stoch.k[13].is_some());
        assert!(stoch.d[14].is_none());
        assert!(stoch.d[15].is_some());
    }

    #[test]
    fn stochastic_in_range() {
        let bars: Vec<OhlcvBar> = (0..40)
            .map(|i| {
                let c = 50.0 + (i as f64 * 0.7).sin() * 10.0;
                make_bar(c + 2.0, c - 2.0, c)
            })
            .collect();
        let stoch = calculate_stochastic(&bars, 14, 3);
        for v in stoch.k.iter().chain(&stoch.d).flatten() {
            assert!((0.0..=100.0).contains(v));
        }
    }
}
