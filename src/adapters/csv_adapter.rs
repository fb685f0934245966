//! CSV file market data adapter.
//!
//! Layout under the base directory:
//! - `{asset}_{quote}.csv`: `timestamp,open,high,low,close,volume`. `open`,
//!   `high`, `low` and `volume` may be left out; missing price columns are
//!   derived from consecutive closes.
//! - `markets_{quote}.csv`: one snapshot row per asset, `sparkline` as
//!   `;`-separated prices.
//! - `sentiment.csv`: `value,classification`; the last row is current.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::domain::error::SignalError;
use crate::domain::market::{MarketSnapshot, Sentiment};
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::market_port::MarketDataPort;
use crate::ports::sentiment_port::SentimentPort;

const SECONDS_PER_DAY: i64 = 86_400;
/// Integer timestamps above this are taken as milliseconds.
const MILLIS_THRESHOLD: u64 = 100_000_000_000;
const DERIVED_HIGH_FACTOR: f64 = 1.004;
const DERIVED_LOW_FACTOR: f64 = 0.996;

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct BarRecord {
    timestamp: String,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketRecord {
    id: String,
    symbol: String,
    name: String,
    current_price: f64,
    market_cap: f64,
    total_volume: f64,
    #[serde(default)]
    price_change_24h: Option<f64>,
    #[serde(default)]
    price_change_7d: Option<f64>,
    #[serde(default)]
    sparkline: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SentimentRecord {
    value: f64,
    #[serde(default)]
    classification: Option<String>,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn ohlcv_path(&self, asset_id: &str, quote: &str) -> PathBuf {
        self.base_path.join(format!("{asset_id}_{quote}.csv"))
    }

    fn markets_path(&self, quote: &str) -> PathBuf {
        self.base_path.join(format!("markets_{quote}.csv"))
    }

    fn sentiment_path(&self) -> PathBuf {
        self.base_path.join("sentiment.csv")
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<fs::File>, SignalError> {
    let file = fs::File::open(path).map_err(|e| {
        SignalError::data_source(format!("failed to read {}: {e}", path.display()))
    })?;
    Ok(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file))
}

/// Unix seconds, unix milliseconds, RFC 3339, or `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<i64, SignalError> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(if n.unsigned_abs() > MILLIS_THRESHOLD { n / 1000 } else { n });
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| SignalError::data_source(format!("invalid timestamp '{raw}'")))
}

fn parse_sparkline(raw: Option<&str>) -> Result<Vec<f64>, SignalError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(Vec::new());
    };
    raw.split(';')
        .map(|p| {
            p.trim().parse::<f64>().map_err(|e| {
                SignalError::data_source(format!("invalid sparkline value '{p}': {e}"))
            })
        })
        .collect()
}

/// Sort by time and fill any missing open/high/low from the close path.
fn assemble_bars(mut records: Vec<(i64, BarRecord)>) -> Vec<OhlcvBar> {
    records.sort_by_key(|(ts, _)| *ts);

    let mut prev_close: Option<f64> = None;
    records
        .into_iter()
        .map(|(timestamp, r)| {
            let bar = match (r.open, r.high, r.low) {
                (Some(open), Some(high), Some(low)) => OhlcvBar {
                    timestamp,
                    open,
                    high,
                    low,
                    close: r.close,
                    volume: r.volume.unwrap_or(0.0),
                },
                _ => {
                    let open = prev_close.unwrap_or(r.close);
                    OhlcvBar {
                        timestamp,
                        open,
                        high: open.max(r.close) * DERIVED_HIGH_FACTOR,
                        low: open.min(r.close) * DERIVED_LOW_FACTOR,
                        close: r.close,
                        volume: r.volume.unwrap_or(0.0),
                    }
                }
            };
            prev_close = Some(r.close);
            bar
        })
        .collect()
}

impl MarketDataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        asset_id: &str,
        quote: &str,
        days: u32,
    ) -> Result<Vec<OhlcvBar>, SignalError> {
        let path = self.ohlcv_path(asset_id, quote);
        let mut rdr = open_reader(&path)?;

        let mut records = Vec::new();
        for result in rdr.deserialize::<BarRecord>() {
            let record = result?;
            let ts = parse_timestamp(&record.timestamp)?;
            records.push((ts, record));
        }

        let bars = assemble_bars(records);
        let Some(last) = bars.last().map(|b| b.timestamp) else {
            return Ok(bars);
        };
        let cutoff = last - i64::from(days) * SECONDS_PER_DAY;
        Ok(bars.into_iter().filter(|b| b.timestamp >= cutoff).collect())
    }

    fn fetch_universe(&self, quote: &str, size: usize) -> Result<Vec<MarketSnapshot>, SignalError> {
        let path = self.markets_path(quote);
        let mut rdr = open_reader(&path)?;

        let mut snapshots = Vec::new();
        for result in rdr.deserialize::<MarketRecord>() {
            let r = result?;
            snapshots.push(MarketSnapshot {
                sparkline: parse_sparkline(r.sparkline.as_deref())?,
                id: r.id,
                symbol: r.symbol,
                name: r.name,
                current_price: r.current_price,
                market_cap: r.market_cap,
                total_volume: r.total_volume,
                price_change_24h: r.price_change_24h,
                price_change_7d: r.price_change_7d,
            });
        }

        snapshots.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
        snapshots.truncate(size);
        Ok(snapshots)
    }
}

impl SentimentPort for CsvAdapter {
    fn fetch_sentiment(&self) -> Result<Sentiment, SignalError> {
        let path = self.sentiment_path();
        let mut rdr = open_reader(&path)?;

        let mut latest = None;
        for result in rdr.deserialize::<SentimentRecord>() {
            latest = Some(result?);
        }

        let record = latest.ok_or_else(|| {
            SignalError::data_source(format!("{} has no rows", path.display()))
        })?;
        Ok(Sentiment {
            value: record.value,
            classification: record
                .classification
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Unclassified".to_string()),
        })
    }
}
