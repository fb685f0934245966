//! Market data access port trait.

use crate::domain::error::SignalError;
use crate::domain::market::MarketSnapshot;
use crate::domain::ohlcv::OhlcvBar;

pub trait MarketDataPort {
    /// Bars for `asset_id` quoted in `quote`, oldest first, covering the trailing `days`.
    fn fetch_ohlcv(
        &self,
        asset_id: &str,
        quote: &str,
        days: u32,
    ) -> Result<Vec<OhlcvBar>, SignalError>;

    /// The top `size` assets by market capitalisation, largest first.
    fn fetch_universe(&self, quote: &str, size: usize) -> Result<Vec<MarketSnapshot>, SignalError>;
}
