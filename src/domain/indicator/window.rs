//! Trailing-window evaluation shared by the windowed indicators.

/// Lift a fully defined column into the optional form used by windowed indicators.
pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Evaluate `f` over the trailing window of `period` values ending at each row.
///
/// Rows before `period - 1` are undefined, and so is any window containing an
/// undefined value. A zero period leaves every row undefined.
pub fn rolling<F>(values: &[Option<f64>], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    (0..values.len())
        .map(|i| {
            if period == 0 || i + 1 < period {
                return None;
            }
            let window: Option<Vec<f64>> = values[i + 1 - period..=i].iter().copied().collect();
            window.and_then(|w| f(&w))
        })
        .collect()
}

pub fn window_min(window: &[f64]) -> Option<f64> {
    window.iter().copied().reduce(f64::min)
}

pub fn window_max(window: &[f64]) -> Option<f64> {
    window.iter().copied().reduce(f64::max)
}
