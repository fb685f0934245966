//! Cross-sectional insight scoring.
//!
//! score = 50 + 1.1*trend + 1.2*(volume_to_mcap*100) - 0.5*volatility + 0.3*(sentiment-50),
//! clamped to [0, 100]. Action and confidence are read from the clamped value;
//! only the reported score is rounded to 2 decimals.

use std::fmt;

use serde::Serialize;

use crate::domain::market::MarketFeatureRow;
use crate::domain::numeric::round_to;
use crate::domain::signal::Confidence;

const MOMENTUM_LONG_AT: f64 = 68.0;
const DEFENSIVE_AT: f64 = 38.0;
const HIGH_VOLATILITY_ABOVE: f64 = 20.0;
const LOW_VOLATILITY_BELOW: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    #[serde(rename = "Momentum Long Setup")]
    MomentumLong,
    #[serde(rename = "Range Trade / Breakout Watch")]
    RangeWatch,
    #[serde(rename = "Defensive / Mean-Reversion Watch")]
    Defensive,
}

impl Action {
    pub fn from_score(score: f64) -> Self {
        if score >= MOMENTUM_LONG_AT {
            Action::MomentumLong
        } else if score <= DEFENSIVE_AT {
            Action::Defensive
        } else {
            Action::RangeWatch
        }
    }

    pub fn rationale(self) -> &'static str {
        match self {
            Action::MomentumLong => {
                "Trend and liquidity align; use staged entries and trail risk."
            }
            Action::RangeWatch => {
                "Conditions are mixed; reduce size and define invalidation clearly."
            }
            Action::Defensive => {
                "Signal quality is weak; preserve capital and wait for confirmation."
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MomentumLong => write!(f, "Momentum Long Setup"),
            Action::RangeWatch => write!(f, "Range Trade / Breakout Watch"),
            Action::Defensive => write!(f, "Defensive / Mean-Reversion Watch"),
        }
    }
}

pub fn risk_note(volatility: f64) -> &'static str {
    if volatility > HIGH_VOLATILITY_ABOVE {
        "High volatility: smaller size, wider stops, lower leverage."
    } else if volatility < LOW_VOLATILITY_BELOW {
        "Low volatility: monitor compression and breakout triggers."
    } else {
        "Normal volatility: keep standard risk allocation."
    }
}

pub fn classify_confidence(score: f64) -> Confidence {
    Confidence::from_score(score, 70.0, 50.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub symbol: String,
    pub score: f64,
    pub confidence: Confidence,
    pub action: Action,
    pub rationale: String,
    pub risk_note: String,
}

fn bounded_score(row: &MarketFeatureRow, sentiment: f64) -> f64 {
    let liquidity = row.volume_to_mcap * 100.0;
    let raw = 50.0 + 1.1 * row.trend_strength + 1.2 * liquidity - 0.5 * row.volatility_score
        + 0.3 * (sentiment - 50.0);
    raw.clamp(0.0, 100.0)
}

/// The reported score: clamped and rounded to 2 decimals.
pub fn insight_score(row: &MarketFeatureRow, sentiment: f64) -> f64 {
    round_to(bounded_score(row, sentiment), 2)
}

pub fn generate_ai_insight(row: &MarketFeatureRow, sentiment: f64) -> Insight {
    let bounded = bounded_score(row, sentiment);
    let action = Action::from_score(bounded);

    Insight {
        symbol: row.symbol.to_uppercase(),
        score: round_to(bounded, 2),
        confidence: classify_confidence(bounded),
        action,
        rationale: action.rationale().to_string(),
        risk_note: risk_note(row.volatility_score).to_string(),
    }
}

/// Score every row and order by score descending; ties keep input order.
pub fn rank_insights(rows: &[MarketFeatureRow], sentiment: f64) -> Vec<Insight> {
    let mut insights: Vec<Insight> = rows
        .iter()
        .map(|row| generate_ai_insight(row, sentiment))
        .collect();
    insights.sort_by(|a, b| b.score.total_cmp(&a.score));
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(trend: f64, volume_to_mcap: f64, volatility: f64) -> MarketFeatureRow {
        MarketFeatureRow {
            id: "solana".into(),
            symbol: "sol".into(),
            name: "Solana".into(),
            current_price: 152.0,
            market_cap: 69e9,
            total_volume: 69e9 * volume_to_mcap,
            momentum_24h: trend,
            momentum_7d: trend,
            trend_strength: trend,
            volatility_score: volatility,
            volume_to_mcap,
        }
    }

    #[test]
    fn neutral_inputs_score_fifty() {
        let insight = generate_ai_insight(&row(0.0, 0.0, 0.0), 50.0);
        assert_eq!(insight.score, 50.0);
        assert_eq!(insight.action, Action::RangeWatch);
        assert_eq!(insight.confidence, Confidence::Moderate);
        assert_eq!(insight.symbol, "SOL");
    }

    #[test]
    fn score_formula() {
        // 50 + 1.1*5 + 1.2*(0.04*100) - 0.5*10 + 0.3*(70-50) = 61.3
        let score = insight_score(&row(5.0, 0.04, 10.0), 70.0);
        assert_relative_eq!(score, 61.3, epsilon = 1e-9);
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(insight_score(&row(80.0, 0.5, 0.0), 100.0), 100.0);
        assert_eq!(insight_score(&row(-80.0, 0.0, 60.0), 0.0), 0.0);
    }

    #[test]
    fn action_boundaries() {
        assert_eq!(Action::from_score(68.0), Action::MomentumLong);
        assert_eq!(Action::from_score(67.99), Action::RangeWatch);
        assert_eq!(Action::from_score(38.0), Action::Defensive);
        assert_eq!(Action::from_score(38.01), Action::RangeWatch);
    }

    #[test]
    fn labels_read_unrounded_score() {
        // 50 + 1.1*16.36 = 67.996, reported as 68.0 but short of the momentum cut-off
        let near_momentum = generate_ai_insight(&row(16.36, 0.0, 0.0), 50.0);
        assert_eq!(near_momentum.score, 68.0);
        assert_eq!(near_momentum.action, Action::RangeWatch);

        // 50 - 0.5*23.992 = 38.004, reported as 38.0 but above the defensive cut-off
        let near_defensive = generate_ai_insight(&row(0.0, 0.0, 23.992), 50.0);
        assert_eq!(near_defensive.score, 38.0);
        assert_eq!(near_defensive.action, Action::RangeWatch);

        // 50 - 0.5*0.009 = 49.9955, reported as 50.0 but still Low
        let near_moderate = generate_ai_insight(&row(0.0, 0.0, 0.009), 50.0);
        assert_eq!(near_moderate.score, 50.0);
        assert_eq!(near_moderate.confidence, Confidence::Low);

        // 50 + 1.1*9.091 + 0.3*(83.32-50) = 69.9961, reported as 70.0 but Moderate
        let near_high = generate_ai_insight(&row(9.091, 0.0, 0.0), 83.32);
        assert_eq!(near_high.score, 70.0);
        assert_eq!(near_high.confidence, Confidence::Moderate);
    }

    #[test]
    fn risk_note_boundaries() {
        assert!(risk_note(20.01).starts_with("High volatility"));
        assert!(risk_note(20.0).starts_with("Normal volatility"));
        assert!(risk_note(8.0).starts_with("Normal volatility"));
        assert!(risk_note(7.99).starts_with("Low volatility"));
    }

    #[test]
    fn confidence_uses_insight_bands() {
        assert_eq!(classify_confidence(80.0), Confidence::High);
        assert_eq!(classify_confidence(60.0), Confidence::Moderate);
        assert_eq!(classify_confidence(10.0), Confidence::Low);
    }

    #[test]
    fn identical_inputs_identical_output() {
        let r = row(3.3, 0.021, 12.5);
        assert_eq!(generate_ai_insight(&r, 61.0), generate_ai_insight(&r, 61.0));
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let mut weak = row(-20.0, 0.0, 30.0);
        weak.symbol = "weak".into();
        let mut tie_a = row(0.0, 0.0, 0.0);
        tie_a.symbol = "a".into();
        let mut tie_b = row(0.0, 0.0, 0.0);
        tie_b.symbol = "b".into();
        let mut strong = row(20.0, 0.05, 2.0);
        strong.symbol = "strong".into();

        let ranked = rank_insights(&[weak, tie_a, strong, tie_b], 50.0);
        let symbols: Vec<&str> = ranked.iter().map(|i| i.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["STRONG", "A", "B", "WEAK"]);
    }

    #[test]
    fn action_label_and_rationale() {
        assert_eq!(Action::Defensive.to_string(), "Defensive / Mean-Reversion Watch");
        assert!(Action::MomentumLong.rationale().starts_with("Trend and liquidity align"));
    }
}
