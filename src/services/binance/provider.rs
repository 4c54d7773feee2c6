//! Binance futures implementation of [`MarketDataSource`].

use chrono::DateTime;
use std::sync::Arc;
use tracing::debug;

use super::client::BinanceRestClient;
use super::messages::{KlineRow, LongShortRatioEntry};
use crate::error::MarketDataError;
use crate::models::indicators::{Candle, PositioningSample};
use crate::services::market_data::{InstrumentSnapshot, MarketDataSource};

const KLINES_ENDPOINT: &str = "klines";
const LONG_SHORT_ENDPOINT: &str = "globalLongShortAccountRatio";

/// Periods accepted by the long/short ratio endpoint.
const POSITIONING_PERIODS: [&str; 9] = ["5m", "15m", "30m", "1h", "2h", "4h", "6h", "12h", "1d"];

/// Positioning period for a bar interval; intervals the ratio endpoint does
/// not offer fall back to the finest period, `5m`.
pub fn positioning_period(interval: &str) -> &'static str {
    POSITIONING_PERIODS
        .iter()
        .copied()
        .find(|period| *period == interval)
        .unwrap_or("5m")
}

pub struct BinanceFuturesSource {
    client: Arc<BinanceRestClient>,
}

impl BinanceFuturesSource {
    pub fn new(client: Arc<BinanceRestClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl MarketDataSource for BinanceFuturesSource {
    async fn list_instruments(&self) -> Result<Vec<String>, MarketDataError> {
        let info = self.client.exchange_info().await?;
        let total = info.symbols.len();
        let symbols: Vec<String> = info
            .symbols
            .into_iter()
            .filter(|symbol| symbol.is_tradable_perpetual())
            .map(|symbol| symbol.symbol)
            .collect();

        debug!(total, tradable = symbols.len(), "binance exchange info loaded");
        Ok(symbols)
    }

    async fn fetch_snapshot(
        &self,
        instrument: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Option<InstrumentSnapshot>, MarketDataError> {
        let rows = self.client.klines(instrument, interval, limit).await?;
        let candles = rows
            .iter()
            .map(parse_kline)
            .collect::<Result<Vec<_>, _>>()?;

        let entries = self
            .client
            .long_short_ratio(instrument, positioning_period(interval), 1)
            .await?;
        let positioning = entries.last().map(parse_positioning).transpose()?;

        debug!(
            instrument,
            candles = candles.len(),
            has_positioning = positioning.is_some(),
            "binance snapshot fetched"
        );

        Ok(Some(InstrumentSnapshot {
            instrument: instrument.to_string(),
            candles,
            positioning,
        }))
    }
}

/// Parse one positional kline row into a [`Candle`].
pub fn parse_kline(row: &KlineRow) -> Result<Candle, MarketDataError> {
    let open_time_ms = row
        .first()
        .and_then(|value| value.as_i64())
        .ok_or_else(|| malformed(KLINES_ENDPOINT, "missing open time"))?;
    let open_time = DateTime::from_timestamp_millis(open_time_ms)
        .ok_or_else(|| malformed(KLINES_ENDPOINT, format!("open time {} out of range", open_time_ms)))?;

    let field = |index: usize, name: &str| -> Result<f64, MarketDataError> {
        let value = row
            .get(index)
            .ok_or_else(|| malformed(KLINES_ENDPOINT, format!("missing {}", name)))?;
        match value {
            serde_json::Value::String(text) => parse_decimal(KLINES_ENDPOINT, name, text),
            serde_json::Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| malformed(KLINES_ENDPOINT, format!("{} is not a number", name))),
            other => Err(malformed(
                KLINES_ENDPOINT,
                format!("{} has unexpected value {}", name, other),
            )),
        }
    };

    Ok(Candle::new(
        field(1, "open")?,
        field(2, "high")?,
        field(3, "low")?,
        field(4, "close")?,
        field(5, "volume")?,
        open_time,
    ))
}

pub fn parse_positioning(entry: &LongShortRatioEntry) -> Result<PositioningSample, MarketDataError> {
    Ok(PositioningSample::new(
        parse_decimal(LONG_SHORT_ENDPOINT, "longAccount", &entry.long_account)?,
        parse_decimal(LONG_SHORT_ENDPOINT, "shortAccount", &entry.short_account)?,
        parse_decimal(LONG_SHORT_ENDPOINT, "longShortRatio", &entry.long_short_ratio)?,
    ))
}

fn parse_decimal(endpoint: &str, name: &str, text: &str) -> Result<f64, MarketDataError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| malformed(endpoint, format!("{} is not numeric: '{}'", name, text)))
}

fn malformed(endpoint: &str, reason: impl Into<String>) -> MarketDataError {
    MarketDataError::Malformed {
        endpoint: endpoint.to_string(),
        reason: reason.into(),
    }
}
