//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]). Warmup: first (n-1) rows are undefined.

use crate::domain::indicator::window::{defined, rolling};
use crate::domain::numeric::mean;

pub const DEFAULT_PERIOD: usize = 20;

pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(&defined(values), period, mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_warmup() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert!(series[0].is_none());
        assert!(series[1].is_none());
        assert!(series[2..].iter().all(Option::is_some));
    }

    #[test]
    fn sma_values() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert_relative_eq!(series[2].unwrap(), 20.0);
        assert_relative_eq!(series[3].unwrap(), 30.0);
        assert_relative_eq!(series[4].unwrap(), 40.0);
    }

    #[test]
    fn sma_short_series_entirely_undefined() {
        let series = calculate_sma(&[1.0; 19], DEFAULT_PERIOD);
        assert_eq!(series.len(), 19);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn sma_empty() {
        assert!(calculate_sma(&[], 3).is_empty());
    }
}
