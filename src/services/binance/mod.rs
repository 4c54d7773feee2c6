//! Binance USDⓈ-M futures market data source.

pub mod client;
pub mod messages;
pub mod provider;

pub use client::{BinanceRestClient, DEFAULT_BASE_URL};
pub use provider::{parse_kline, parse_positioning, positioning_period, BinanceFuturesSource};
