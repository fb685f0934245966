//! Core domain types and logic.

pub mod config_validation;
pub mod consensus;
pub mod error;
pub mod indicator;
pub mod insight;
pub mod market;
pub mod numeric;
pub mod ohlcv;
pub mod pipeline;
pub mod planner;
pub mod preset;
pub mod settings;
pub mod signal;
