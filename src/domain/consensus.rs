//! Consensus across the bot verdicts for one asset.

use serde::Serialize;

use crate::domain::signal::{BotSignal, Side};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsensusSummary {
    pub aggregate_score: f64,
    pub buy_votes: usize,
}

/// Mean score and BUY count; an empty set yields zero for both.
pub fn aggregate_symbol_score(signals: &[BotSignal]) -> ConsensusSummary {
    if signals.is_empty() {
        return ConsensusSummary {
            aggregate_score: 0.0,
            buy_votes: 0,
        };
    }

    let total: f64 = signals.iter().map(|s| s.score).sum();
    ConsensusSummary {
        aggregate_score: total / signals.len() as f64,
        buy_votes: signals.iter().filter(|s| s.side == Side::Buy).count(),
    }
}
