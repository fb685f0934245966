//! Tracing subscriber setup. Logs go to stderr so result tables on stdout stay clean.

use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LEVEL: &str = "info";

/// Resolve the filter: `RUST_LOG` wins, then `level`, then [`DEFAULT_LEVEL`].
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .and_then(|l| EnvFilter::from_str(l).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(level: Option<&str>) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let installed = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = level.unwrap_or(DEFAULT_LEVEL), "logging initialized");
    }
}
