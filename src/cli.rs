//! CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fixture_adapter::FixtureAdapter;
use crate::adapters::table_writer::write_table;
use crate::domain::config_validation::{
    validate_market_config, validate_planner_config, validate_preset_config,
};
use crate::domain::error::SignalError;
use crate::domain::market::{MarketSnapshot, PriceBook, Sentiment};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::pipeline::{analyze_asset, build_heatmap, build_market_insights};
use crate::domain::planner::{build_order_plan, Order};
use crate::domain::preset::RiskPreset;
use crate::domain::settings::{
    DataSourceKind, MarketSettings, PlanOverrides, PlanSettings, DEFAULT_ACCOUNT_SIZE,
    DEFAULT_EXECUTION_MODE, DEFAULT_PRESET,
};
use crate::domain::signal::rank_signals;
use crate::logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_port::MarketDataPort;
use crate::ports::sentiment_port::SentimentPort;

#[derive(Parser, Debug)]
#[command(name = "signalpro", about = "Crypto market signals, insights and order planning")]
pub struct Cli {
    /// INI configuration file; built-in defaults apply without one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `signalpro=trace` (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Indicators, bot signals and consensus for one asset
    Analyze {
        /// Asset id as used by the data source, e.g. `bitcoin`
        asset: String,
        /// Display symbol; defaults to the upper-cased asset id
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        days: Option<u32>,
        /// Print the enriched indicator series instead of the signals
        #[arg(long)]
        indicators: bool,
    },
    /// Rank the market universe by insight score
    Insights {
        #[arg(long)]
        universe_size: Option<usize>,
    },
    /// Turn the ranked insights into an order plan
    Plan {
        #[arg(long)]
        preset: Option<String>,
        #[arg(long)]
        account_size: Option<f64>,
        #[arg(long)]
        max_positions: Option<usize>,
        #[arg(long)]
        execution_mode: Option<String>,
    },
    /// Bot consensus for the largest assets
    Heatmap {
        #[arg(long)]
        size: Option<usize>,
    },
    /// List the built-in risk presets
    Presets,
    /// Validate a configuration file without fetching data
    Validate,
}

/// The configured data source behind both market ports.
pub enum DataSource {
    Csv(CsvAdapter),
    Fixture(FixtureAdapter),
}

impl DataSource {
    pub fn from_settings(settings: &MarketSettings) -> Result<Self, SignalError> {
        match settings.source {
            DataSourceKind::Fixture => Ok(DataSource::Fixture(FixtureAdapter::new())),
            DataSourceKind::Csv => {
                let dir = settings.data_dir.clone().ok_or_else(|| SignalError::ConfigMissing {
                    section: "market".into(),
                    key: "data_dir".into(),
                })?;
                Ok(DataSource::Csv(CsvAdapter::new(dir)))
            }
        }
    }
}

impl MarketDataPort for DataSource {
    fn fetch_ohlcv(
        &self,
        asset_id: &str,
        quote: &str,
        days: u32,
    ) -> Result<Vec<OhlcvBar>, SignalError> {
        match self {
            DataSource::Csv(a) => a.fetch_ohlcv(asset_id, quote, days),
            DataSource::Fixture(a) => a.fetch_ohlcv(asset_id, quote, days),
        }
    }

    fn fetch_universe(&self, quote: &str, size: usize) -> Result<Vec<MarketSnapshot>, SignalError> {
        match self {
            DataSource::Csv(a) => a.fetch_universe(quote, size),
            DataSource::Fixture(a) => a.fetch_universe(quote, size),
        }
    }
}

impl SentimentPort for DataSource {
    fn fetch_sentiment(&self) -> Result<Sentiment, SignalError> {
        match self {
            DataSource::Csv(a) => a.fetch_sentiment(),
            DataSource::Fixture(a) => a.fetch_sentiment(),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let adapter = match load_config(cli.config.as_ref()) {
        Ok(a) => a,
        Err(e) => return report(&e),
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| adapter.get_string("logging", "level"));
    logging::init(level.as_deref());

    let result = match cli.command {
        Command::Analyze {
            asset,
            symbol,
            days,
            indicators,
        } => run_analyze(&adapter, &asset, symbol.as_deref(), days, indicators),
        Command::Insights { universe_size } => run_insights(&adapter, universe_size),
        Command::Plan {
            preset,
            account_size,
            max_positions,
            execution_mode,
        } => {
            let overrides = PlanOverrides {
                preset,
                account_size,
                max_positions,
                execution_mode,
            };
            run_plan(&adapter, &overrides)
        }
        Command::Heatmap { size } => run_heatmap(&adapter, size),
        Command::Presets => write_table(io::stdout().lock(), &RiskPreset::builtins()),
        Command::Validate => run_validate(&adapter),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(err: &SignalError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

/// Load the INI file at `path`, or an empty configuration when none is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, SignalError> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => FileConfigAdapter::from_string(""),
    }
}

fn config_usize(config: &dyn ConfigPort, section: &str, key: &str, default: usize) -> usize {
    usize::try_from(config.get_int(section, key, default as i64)).unwrap_or(default)
}

fn config_u32(config: &dyn ConfigPort, section: &str, key: &str, default: u32) -> u32 {
    u32::try_from(config.get_int(section, key, i64::from(default))).unwrap_or(default)
}

pub fn build_market_settings(config: &dyn ConfigPort) -> Result<MarketSettings, SignalError> {
    validate_market_config(config)?;
    let defaults = MarketSettings::default();

    let source = match config.get_string("market", "source") {
        Some(raw) => raw
            .parse()
            .map_err(|reason: String| SignalError::invalid("market", "source", reason))?,
        None => defaults.source,
    };

    Ok(MarketSettings {
        source,
        data_dir: config
            .get_string("market", "data_dir")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from),
        quote: config
            .get_string("market", "quote")
            .map(|q| q.trim().to_lowercase())
            .unwrap_or(defaults.quote),
        universe_size: config_usize(config, "market", "universe_size", defaults.universe_size),
        heatmap_size: config_usize(config, "market", "heatmap_size", defaults.heatmap_size),
        history_days: config_u32(config, "market", "history_days", defaults.history_days),
        heatmap_days: config_u32(config, "market", "heatmap_days", defaults.heatmap_days),
    })
}

/// The `[planner] preset` built-in (default Intraday Alpha) with any
/// `[preset]` keys applied on top.
pub fn build_preset(config: &dyn ConfigPort) -> Result<RiskPreset, SignalError> {
    validate_preset_config(config)?;
    let name = config
        .get_string("planner", "preset")
        .unwrap_or_else(|| DEFAULT_PRESET.to_string());
    let base = RiskPreset::find(&name)?;
    Ok(apply_preset_overrides(config, base))
}

fn apply_preset_overrides(config: &dyn ConfigPort, base: RiskPreset) -> RiskPreset {
    RiskPreset {
        name: config
            .get_string("preset", "name")
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(base.name),
        timeframe: config
            .get_string("preset", "timeframe")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(base.timeframe),
        risk_per_trade: config.get_double("preset", "risk_per_trade", base.risk_per_trade),
        max_positions: config_usize(config, "preset", "max_positions", base.max_positions),
        stop_loss_pct: config.get_double("preset", "stop_loss_pct", base.stop_loss_pct),
        take_profit_pct: config.get_double("preset", "take_profit_pct", base.take_profit_pct),
        min_signal_score: config.get_double("preset", "min_signal_score", base.min_signal_score),
    }
}

/// Resolve plan settings: command-line overrides, then `[planner]`, then the
/// preset's own defaults. A preset named on the command line is used as built.
pub fn build_plan_settings(
    config: &dyn ConfigPort,
    overrides: &PlanOverrides,
) -> Result<PlanSettings, SignalError> {
    validate_planner_config(config)?;

    let preset = match &overrides.preset {
        Some(name) => RiskPreset::find(name)?,
        None => build_preset(config)?,
    };

    let account_size = overrides
        .account_size
        .unwrap_or_else(|| config.get_double("planner", "account_size", DEFAULT_ACCOUNT_SIZE));
    if !(account_size.is_finite() && account_size > 0.0) {
        return Err(SignalError::invalid(
            "planner",
            "account_size",
            "account_size must be a positive number",
        ));
    }

    let max_positions = overrides
        .max_positions
        .unwrap_or_else(|| config_usize(config, "planner", "max_positions", preset.max_positions));

    let execution_mode = overrides
        .execution_mode
        .clone()
        .or_else(|| config.get_string("planner", "execution_mode"))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_EXECUTION_MODE.to_string());

    Ok(PlanSettings {
        preset,
        account_size,
        max_positions,
        execution_mode,
    })
}

fn open_source(config: &dyn ConfigPort) -> Result<(MarketSettings, DataSource), SignalError> {
    let settings = build_market_settings(config)?;
    let source = DataSource::from_settings(&settings)?;
    tracing::info!(source = %settings.source, quote = %settings.quote, "data source ready");
    Ok((settings, source))
}

fn run_analyze(
    config: &dyn ConfigPort,
    asset: &str,
    symbol: Option<&str>,
    days: Option<u32>,
    indicators: bool,
) -> Result<(), SignalError> {
    let (mut settings, source) = open_source(config)?;
    if let Some(days) = days {
        settings.history_days = days;
    }
    let symbol = symbol.map_or_else(|| asset.to_uppercase(), str::to_uppercase);
    run_analyze_pipeline(&source, &settings, asset, &symbol, indicators, &mut io::stdout().lock())
}

/// Analyze one asset and write either its signals or its indicator rows to `out`.
pub fn run_analyze_pipeline(
    market: &dyn MarketDataPort,
    settings: &MarketSettings,
    asset: &str,
    symbol: &str,
    indicators: bool,
    out: &mut dyn Write,
) -> Result<(), SignalError> {
    let snapshot = analyze_asset(market, asset, symbol, &settings.quote, settings.history_days)?;

    if indicators {
        let rows: Vec<_> = snapshot.series.rows().collect();
        return write_table(out, &rows);
    }

    write_table(&mut *out, &rank_signals(&snapshot.signals))?;
    eprintln!(
        "{}: aggregate score {:.2}, {} of {} bots BUY",
        snapshot.symbol,
        snapshot.summary.aggregate_score,
        snapshot.summary.buy_votes,
        snapshot.signals.len()
    );
    Ok(())
}

fn run_insights(config: &dyn ConfigPort, universe_size: Option<usize>) -> Result<(), SignalError> {
    let (mut settings, source) = open_source(config)?;
    if let Some(size) = universe_size {
        settings.universe_size = size;
    }
    let insights =
        build_market_insights(&source, &source, &settings.quote, settings.universe_size)?;
    eprintln!(
        "Sentiment: {} ({})",
        insights.sentiment.value, insights.sentiment.classification
    );
    write_table(io::stdout().lock(), &insights.insights)
}

fn run_plan(config: &dyn ConfigPort, overrides: &PlanOverrides) -> Result<(), SignalError> {
    let (settings, source) = open_source(config)?;
    let plan = build_plan_settings(config, overrides)?;
    let orders = run_plan_pipeline(&source, &source, &settings, &plan)?;
    write_table(io::stdout().lock(), &orders)
}

/// Insights for the configured universe turned into orders under `plan`.
pub fn run_plan_pipeline(
    market: &dyn MarketDataPort,
    sentiment: &dyn SentimentPort,
    settings: &MarketSettings,
    plan: &PlanSettings,
) -> Result<Vec<Order>, SignalError> {
    let insights =
        build_market_insights(market, sentiment, &settings.quote, settings.universe_size)?;
    let prices = PriceBook::from_rows(&insights.features);

    let orders = build_order_plan(
        &insights.insights,
        &prices,
        &plan.preset,
        plan.account_size,
        plan.max_positions,
        &plan.execution_mode,
    );

    eprintln!(
        "{} preset ({}): {} order(s), account {:.2}, mode {}",
        plan.preset.name,
        plan.preset.timeframe,
        orders.len(),
        plan.account_size,
        plan.execution_mode
    );
    if orders.is_empty() {
        tracing::info!(
            min_signal_score = plan.preset.min_signal_score,
            "no candidate met the preset threshold"
        );
    }
    Ok(orders)
}

fn run_heatmap(config: &dyn ConfigPort, size: Option<usize>) -> Result<(), SignalError> {
    let (mut settings, source) = open_source(config)?;
    if let Some(size) = size {
        settings.heatmap_size = size;
    }
    let universe = source.fetch_universe(&settings.quote, settings.heatmap_size)?;
    let rows = build_heatmap(&source, &universe, &settings.quote, settings.heatmap_days);
    tracing::info!(assets = universe.len(), rows = rows.len(), "heatmap built");
    write_table(io::stdout().lock(), &rows)
}

fn run_validate(config: &dyn ConfigPort) -> Result<(), SignalError> {
    let settings = build_market_settings(config)?;
    let plan = build_plan_settings(config, &PlanOverrides::default())?;
    eprintln!(
        "Config valid: source {}, quote {}, preset {}",
        settings.source, settings.quote, plan.preset.name
    );
    Ok(())
}
