//! Configuration validation.
//!
//! Validates all config fields before a run. Absent keys fall back to their
//! defaults and are not errors, except where a choice makes a key required.

use crate::domain::error::SignalError;
use crate::domain::preset::RiskPreset;
use crate::domain::settings::DataSourceKind;
use crate::ports::config_port::ConfigPort;

pub fn validate_market_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_source(config)?;
    validate_quote(config)?;
    validate_int_at_least(config, "market", "universe_size", 1)?;
    validate_int_at_least(config, "market", "heatmap_size", 1)?;
    validate_int_at_least(config, "market", "history_days", 1)?;
    validate_int_at_least(config, "market", "heatmap_days", 1)?;
    Ok(())
}

pub fn validate_planner_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_preset_name(config)?;
    validate_account_size(config)?;
    validate_int_at_least(config, "planner", "max_positions", 0)?;
    validate_execution_mode(config)?;
    Ok(())
}

/// The `[preset]` section is optional; every key present must be in range.
pub fn validate_preset_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_preset_value(config, "risk_per_trade", "(0, 100]", |v| {
        v > 0.0 && v <= 100.0
    })?;
    validate_preset_value(config, "stop_loss_pct", "[0, 100)", |v| {
        (0.0..100.0).contains(&v)
    })?;
    validate_preset_value(config, "take_profit_pct", "[0, inf)", |v| {
        v >= 0.0 && v.is_finite()
    })?;
    validate_preset_value(config, "min_signal_score", "[0, 100]", |v| {
        (0.0..=100.0).contains(&v)
    })?;
    validate_int_at_least(config, "preset", "max_positions", 0)?;
    Ok(())
}

fn validate_source(config: &dyn ConfigPort) -> Result<(), SignalError> {
    let Some(raw) = config.get_string("market", "source") else {
        return Ok(());
    };
    let kind: DataSourceKind = raw
        .parse()
        .map_err(|reason: String| SignalError::invalid("market", "source", reason))?;

    if kind == DataSourceKind::Csv {
        match config.get_string("market", "data_dir") {
            Some(dir) if !dir.trim().is_empty() => {}
            _ => {
                return Err(SignalError::ConfigMissing {
                    section: "market".to_string(),
                    key: "data_dir".to_string(),
                })
            }
        }
    }
    Ok(())
}

fn validate_quote(config: &dyn ConfigPort) -> Result<(), SignalError> {
    match config.get_string("market", "quote") {
        Some(q) if q.trim().is_empty() => {
            Err(SignalError::invalid("market", "quote", "quote must not be empty"))
        }
        Some(q) if !q.trim().chars().all(|c| c.is_ascii_alphanumeric()) => Err(
            SignalError::invalid("market", "quote", "quote must be alphanumeric"),
        ),
        _ => Ok(()),
    }
}

fn validate_int_at_least(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    min: i64,
) -> Result<(), SignalError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= min => Ok(()),
        Ok(_) => Err(SignalError::invalid(
            section,
            key,
            format!("{key} must be at least {min}"),
        )),
        Err(_) => Err(SignalError::invalid(
            section,
            key,
            format!("{key} must be an integer"),
        )),
    }
}

fn validate_preset_name(config: &dyn ConfigPort) -> Result<(), SignalError> {
    match config.get_string("planner", "preset") {
        Some(name) => RiskPreset::find(&name).map(|_| ()),
        None => Ok(()),
    }
}

fn validate_account_size(config: &dyn ConfigPort) -> Result<(), SignalError> {
    if config.get_string("planner", "account_size").is_none() {
        return Ok(());
    }
    let value = config.get_double("planner", "account_size", f64::NAN);
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(SignalError::invalid(
        "planner",
        "account_size",
        "account_size must be a positive number",
    ))
}

fn validate_execution_mode(config: &dyn ConfigPort) -> Result<(), SignalError> {
    match config.get_string("planner", "execution_mode") {
        Some(mode) if mode.trim().is_empty() => Err(SignalError::invalid(
            "planner",
            "execution_mode",
            "execution_mode must not be empty",
        )),
        _ => Ok(()),
    }
}

fn validate_preset_value(
    config: &dyn ConfigPort,
    key: &str,
    range: &str,
    accept: impl Fn(f64) -> bool,
) -> Result<(), SignalError> {
    if config.get_string("preset", key).is_none() {
        return Ok(());
    }
    let value = config.get_double("preset", key, f64::NAN);
    if accept(value) {
        return Ok(());
    }
    Err(SignalError::invalid("preset", key, format!("{key} must be in {range}")))
}
