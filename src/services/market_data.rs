//! Market data source interface and an in-memory implementation.

use std::collections::HashMap;

use crate::error::MarketDataError;
use crate::models::indicators::{Candle, PositioningSample};

/// Candle window and latest positioning sample for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentSnapshot {
    pub instrument: String,
    pub candles: Vec<Candle>,
    pub positioning: Option<PositioningSample>,
}

#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Instruments the scanner should evaluate.
    async fn list_instruments(&self) -> Result<Vec<String>, MarketDataError>;

    /// Up to `limit` newest candles for `interval` plus the latest positioning
    /// sample. `None` means the source does not know the instrument.
    async fn fetch_snapshot(
        &self,
        instrument: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Option<InstrumentSnapshot>, MarketDataError>;
}

/// Fixed snapshots, served in insertion order. Useful for replays and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    order: Vec<String>,
    snapshots: HashMap<String, InstrumentSnapshot>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(
        mut self,
        instrument: impl Into<String>,
        candles: Vec<Candle>,
        positioning: Option<PositioningSample>,
    ) -> Self {
        let instrument = instrument.into();
        if !self.snapshots.contains_key(&instrument) {
            self.order.push(instrument.clone());
        }
        self.snapshots.insert(
            instrument.clone(),
            InstrumentSnapshot {
                instrument,
                candles,
                positioning,
            },
        );
        self
    }
}

#[async_trait::async_trait]
impl MarketDataSource for InMemoryMarketData {
    async fn list_instruments(&self) -> Result<Vec<String>, MarketDataError> {
        Ok(self.order.clone())
    }

    async fn fetch_snapshot(
        &self,
        instrument: &str,
        _interval: &str,
        limit: usize,
    ) -> Result<Option<InstrumentSnapshot>, MarketDataError> {
        Ok(self.snapshots.get(instrument).map(|snapshot| {
            let skip = snapshot.candles.len().saturating_sub(limit);
            InstrumentSnapshot {
                instrument: snapshot.instrument.clone(),
                candles: snapshot.candles[skip..].to_vec(),
                positioning: snapshot.positioning,
            }
        }))
    }
}
