//! OBV (On-Balance Volume).

use crate::domain::ohlcv::OhlcvBar;

/// Calculate OBV (On-Balance Volume).
///
/// The first bar contributes 0 regardless of its volume.
/// If close[i] > close[i-1]: OBV[i] = OBV[i-1] + volume[i]
/// Otherwise (fell or unchanged): OBV[i] = OBV[i-1] - volume[i]
///
/// No warmup period; every row is defined.
pub fn calculate_obv(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .scan(0.0, |obv, (i, bar)| {
            let direction = match i {
                0 => 0.0,
                _ if bar.close > bars[i - 1].close => 1.0,
                _ => -1.0,
            };
            *obv += direction * bar.volume;
            Some(*obv)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(close: f64, volume: f64) -> OhlcvBar {
        OhlcvBar {
            timestamp: 0,
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    #[test]
    fn obv_first_bar_contributes_nothing() {
        let series = calculate_obv(&[make_bar(100.0, 1000.0)]);
        assert_eq!(series, vec![0.0]);
    }

    #[test]
    fn obv_adds_volume_on_up_bar() {
        let series = calculate_obv(&[make_bar(100.0, 1000.0), make_bar(105.0, 500.0)]);
        assert_eq!(series[1], 500.0);
    }

    #[test]
    fn obv_subtracts_volume_on_down_bar() {
        let series = calculate_obv(&[make_bar(100.0, 1000.0), make_bar(95.0, 300.0)]);
        assert_eq!(series[1], -300.0);
    }

    #[test]
    fn obv_flat_bar_counts_as_down() {
        let series = calculate_obv(&[make_bar(100.0, 1000.0), make_bar(100.0, 500.0)]);
        assert_eq!(series[1], -500.0);
    }

    #[test]
    fn obv_accumulates() {
        let series = calculate_obv(&[
            make_bar(100.0, 1000.0),
            make_bar(105.0, 500.0),
            make_bar(102.0, 200.0),
            make_bar(110.0, 50.0),
        ]);
        assert_eq!(series, vec![0.0, 500.0, 300.0, 350.0]);
    }
}
