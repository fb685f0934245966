//! Port traits the domain depends on; adapters provide the implementations.

pub mod config_port;
pub mod market_port;
pub mod price_port;
pub mod sentiment_port;
