//! RSI (Relative Strength Index).
//!
//! Per-bar deltas are split into gains and losses; each side is smoothed
//! recursively with alpha = 1/n, seeded at the first delta.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0 the ratio has no value and neither does RSI.
//!
//! Warmup: the first n rows are undefined (n deltas are needed, and row 0 has none).

use crate::domain::indicator::ema::exponential_smoothing;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || closes.len() < 2 {
        return vec![None; closes.len()];
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let alpha = 1.0 / period as f64;
    let avg_gain = exponential_smoothing(&gains, alpha);
    let avg_loss = exponential_smoothing(&losses, alpha);

    let smoothed = avg_gain
        .iter()
        .zip(&avg_loss)
        .enumerate()
        .map(|(observed, (&gain, &loss))| {
            if observed + 1 < period {
                None
            } else {
                rsi_from_averages(gain, loss)
            }
        });

    std::iter::once(None).chain(smoothed).collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return None;
    }
    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}
