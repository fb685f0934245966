//! Current-price lookup used by the order planner.

use std::collections::HashMap;

pub trait PriceSource {
    fn current_price(&self, symbol: &str) -> Option<f64>;
}

/// Exact-key lookup; callers supply the symbols as they appear on insights.
impl PriceSource for HashMap<String, f64> {
    fn current_price(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).copied()
    }
}
