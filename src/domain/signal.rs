//! Rule-based signal bots.
//!
//! Every bot reads the latest row of an [`EnrichedSeries`] (the breakout bot
//! also reads the row before it), adds a fixed bonus or penalty per rule to a
//! base score of 50, and maps the clamped score to a side and confidence band.
//! A rule whose inputs are undefined takes its penalty branch.

use std::fmt;

use serde::Serialize;

use crate::domain::indicator::EnrichedSeries;
use crate::domain::numeric::clamp_score;

const BASE_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    pub fn from_score(score: f64, high_at: f64, moderate_at: f64) -> Self {
        if score >= high_at {
            Confidence::High
        } else if score >= moderate_at {
            Confidence::Moderate
        } else {
            Confidence::Low
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Hold => write!(f, "HOLD"),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "Low"),
            Confidence::Moderate => write!(f, "Moderate"),
            Confidence::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotSignal {
    pub symbol: String,
    pub bot: String,
    pub side: Side,
    pub confidence: Confidence,
    pub score: f64,
    pub reason: String,
}

/// Anything that can turn an enriched series into a verdict.
pub trait SignalBot {
    fn name(&self) -> &str;
    fn evaluate(&self, symbol: &str, series: &EnrichedSeries) -> BotSignal;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bot {
    Trend,
    MeanReversion,
    Breakout,
}

/// Score cut-offs for one bot: BUY at `buy_at`, bands at `high_at`/`moderate_at`.
struct Thresholds {
    buy_at: f64,
    high_at: f64,
    moderate_at: f64,
}

impl Bot {
    pub const ALL: [Bot; 3] = [Bot::Trend, Bot::MeanReversion, Bot::Breakout];

    fn thresholds(self) -> Thresholds {
        match self {
            Bot::Trend => Thresholds {
                buy_at: 55.0,
                high_at: 70.0,
                moderate_at: 55.0,
            },
            Bot::MeanReversion => Thresholds {
                buy_at: 60.0,
                high_at: 75.0,
                moderate_at: 60.0,
            },
            Bot::Breakout => Thresholds {
                buy_at: 62.0,
                high_at: 76.0,
                moderate_at: 62.0,
            },
        }
    }

    /// Side and confidence band for a clamped score.
    pub fn verdict(self, score: f64) -> (Side, Confidence) {
        let t = self.thresholds();
        let side = if score >= t.buy_at { Side::Buy } else { Side::Hold };
        (side, Confidence::from_score(score, t.high_at, t.moderate_at))
    }

    fn reason(self) -> &'static str {
        match self {
            Bot::Trend => "Trend-following EMA+MACD+RSI consensus",
            Bot::MeanReversion => "Oversold reversion with Bollinger and Stochastic confirmation",
            Bot::Breakout => "Breakout momentum above bands with volume/VWAP confirmation",
        }
    }

    fn raw_score(self, series: &EnrichedSeries) -> f64 {
        let latest = series.latest();
        let row = latest.as_ref();
        let close = row.map(|r| r.close);

        match self {
            Bot::Trend => {
                BASE_SCORE
                    + rule(above(close, row.map(|r| r.ema_20)), 12.0, 10.0)
                    + rule(above(row.map(|r| r.macd), row.map(|r| r.signal)), 10.0, 8.0)
                    + rule(above(row.and_then(|r| r.rsi_14), Some(50.0)), 8.0, 6.0)
            }
            Bot::MeanReversion => {
                BASE_SCORE
                    + rule(below(row.and_then(|r| r.rsi_14), Some(35.0)), 15.0, 8.0)
                    + rule(below(close, row.and_then(|r| r.bb_lower)), 12.0, 7.0)
                    + rule(below(row.and_then(|r| r.stoch_k), Some(20.0)), 6.0, 5.0)
            }
            Bot::Breakout => {
                // With a single row the bar is compared to itself.
                let prior = series.previous().or_else(|| latest.clone());
                BASE_SCORE
                    + rule(above(close, row.and_then(|r| r.bb_upper)), 14.0, 6.0)
                    + rule(
                        above(row.map(|r| r.volume), prior.as_ref().map(|r| r.volume)),
                        10.0,
                        4.0,
                    )
                    + rule(above(close, row.and_then(|r| r.vwap)), 8.0, 5.0)
            }
        }
    }
}

impl SignalBot for Bot {
    fn name(&self) -> &str {
        match self {
            Bot::Trend => "TrendBot",
            Bot::MeanReversion => "MeanReversionBot",
            Bot::Breakout => "BreakoutBot",
        }
    }

    fn evaluate(&self, symbol: &str, series: &EnrichedSeries) -> BotSignal {
        let score = clamp_score(self.raw_score(series));
        let (side, confidence) = self.verdict(score);

        BotSignal {
            symbol: symbol.to_string(),
            bot: self.name().to_string(),
            side,
            confidence,
            score,
            reason: self.reason().to_string(),
        }
    }
}

fn rule(condition: bool, bonus: f64, penalty: f64) -> f64 {
    if condition { bonus } else { -penalty }
}

fn above(left: Option<f64>, right: Option<f64>) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l > r)
}

fn below(left: Option<f64>, right: Option<f64>) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l < r)
}

/// Evaluate `bots` in order; the result keeps that order.
pub fn run_bot_suite<B: SignalBot>(
    symbol: &str,
    series: &EnrichedSeries,
    bots: &[B],
) -> Vec<BotSignal> {
    bots.iter().map(|bot| bot.evaluate(symbol, series)).collect()
}

pub fn run_default_suite(symbol: &str, series: &EnrichedSeries) -> Vec<BotSignal> {
    run_bot_suite(symbol, series, &Bot::ALL)
}

/// Display order: score descending, ties keep evaluation order.
pub fn rank_signals(signals: &[BotSignal]) -> Vec<BotSignal> {
    let mut ranked = signals.to_vec();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
