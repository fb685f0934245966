//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: Middle + (k × StdDev)
//! - Lower: Middle - (k × StdDev)
//!
//! StdDev is the population standard deviation (divides by N, not N-1).
//! Warmup: first (period-1) rows are undefined.

use crate::domain::indicator::window::{defined, rolling};
use crate::domain::numeric::{mean, population_std};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn calculate_bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerSeries {
    let values = defined(closes);
    let middle = rolling(&values, period, mean);
    let std = rolling(&values, period, population_std);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&std)
            .map(|(m, s)| Some((*m)? + sign * multiplier * (*s)?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}
