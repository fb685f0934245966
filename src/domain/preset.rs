//! Risk presets for order planning.

use serde::Serialize;

use crate::domain::error::SignalError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskPreset {
    pub name: String,
    pub timeframe: String,
    /// Percent of account equity risked per trade.
    pub risk_per_trade: f64,
    pub max_positions: usize,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub min_signal_score: f64,
}

impl RiskPreset {
    pub fn scalp_pro() -> Self {
        RiskPreset {
            name: "Scalp Pro".into(),
            timeframe: "5m".into(),
            risk_per_trade: 0.75,
            max_positions: 6,
            stop_loss_pct: 1.1,
            take_profit_pct: 2.2,
            min_signal_score: 65.0,
        }
    }

    pub fn intraday_alpha() -> Self {
        RiskPreset {
            name: "Intraday Alpha".into(),
            timeframe: "15m".into(),
            risk_per_trade: 1.0,
            max_positions: 4,
            stop_loss_pct: 1.8,
            take_profit_pct: 3.6,
            min_signal_score: 62.0,
        }
    }

    pub fn swing_smart() -> Self {
        RiskPreset {
            name: "Swing Smart".into(),
            timeframe: "4h".into(),
            risk_per_trade: 1.25,
            max_positions: 3,
            stop_loss_pct: 4.0,
            take_profit_pct: 9.0,
            min_signal_score: 58.0,
        }
    }

    pub fn builtins() -> Vec<RiskPreset> {
        vec![Self::scalp_pro(), Self::intraday_alpha(), Self::swing_smart()]
    }

    /// Look up a built-in preset by name, ignoring case and surrounding whitespace.
    pub fn find(name: &str) -> Result<RiskPreset, SignalError> {
        let wanted = name.trim();
        Self::builtins()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SignalError::UnknownPreset {
                name: wanted.to_string(),
            })
    }
}
