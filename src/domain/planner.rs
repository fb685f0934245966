//! Order planning: ranked insights to sized long entries under a risk preset.

use serde::Serialize;

use crate::domain::insight::Insight;
use crate::domain::numeric::round_to;
use crate::domain::preset::RiskPreset;
use crate::ports::price_port::PriceSource;

/// Floor for per-unit risk so a zero stop distance cannot divide by zero.
pub const MIN_UNIT_RISK: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderAction {
    Buy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub symbol: String,
    pub signal_score: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size_units: f64,
    pub action: OrderAction,
    pub execution_mode: String,
}

/// Build the order plan for already-ranked `insights`.
///
/// Keeps insights scoring at least `preset.min_signal_score`, truncates to
/// `max_positions`, then skips candidates without a positive current price.
/// The result is ordered by signal score descending (stable).
pub fn build_order_plan(
    insights: &[Insight],
    prices: &dyn PriceSource,
    preset: &RiskPreset,
    account_size: f64,
    max_positions: usize,
    execution_mode: &str,
) -> Vec<Order> {
    let risk_amount = account_size * preset.risk_per_trade / 100.0;

    let mut orders: Vec<Order> = insights
        .iter()
        .filter(|insight| insight.score >= preset.min_signal_score)
        .take(max_positions)
        .filter_map(|insight| {
            let entry = match prices.current_price(&insight.symbol) {
                Some(price) if price > 0.0 => price,
                other => {
                    tracing::debug!(
                        symbol = %insight.symbol,
                        price = ?other,
                        "skipping candidate without a usable price"
                    );
                    return None;
                }
            };

            let stop = entry * (1.0 - preset.stop_loss_pct / 100.0);
            let target = entry * (1.0 + preset.take_profit_pct / 100.0);
            let unit_risk = (entry - stop).max(MIN_UNIT_RISK);

            Some(Order {
                symbol: insight.symbol.clone(),
                signal_score: insight.score,
                entry: round_to(entry, 6),
                stop_loss: round_to(stop, 6),
                take_profit: round_to(target, 6),
                position_size_units: round_to(risk_amount / unit_risk, 4),
                action: OrderAction::Buy,
                execution_mode: execution_mode.to_string(),
            })
        })
        .collect();

    orders.sort_by(|a, b| b.signal_score.total_cmp(&a.signal_score));
    orders
}
