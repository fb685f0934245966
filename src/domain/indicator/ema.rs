//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the first value, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! There is no warmup: every row is defined.

pub const DEFAULT_PERIOD: usize = 20;

/// A period of zero is treated as one (the EMA then tracks its input).
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period.max(1) as f64 + 1.0);
    exponential_smoothing(values, k)
}

/// Recursive weighted update `y[i] = alpha*x[i] + (1-alpha)*y[i-1]`, seeded with `x[0]`.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Vec<f64> {
    values
        .iter()
        .scan(None, |prev: &mut Option<f64>, &x| {
            let next = match *prev {
                None => x,
                Some(p) => alpha * x + (1.0 - alpha) * p,
            };
            *prev = Some(next);
            Some(next)
        })
        .collect()
}
