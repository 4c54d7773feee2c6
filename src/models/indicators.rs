use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One closed bar. Sequences are ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        open_time: DateTime<Utc>,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Latest long/short account split for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositioningSample {
    pub long_account: f64,
    pub short_account: f64,
    pub long_short_ratio: f64,
}

impl PositioningSample {
    pub fn new(long_account: f64, short_account: f64, long_short_ratio: f64) -> Self {
        Self {
            long_account,
            short_account,
            long_short_ratio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub period: (usize, usize, usize),
}

impl MacdIndicator {
    pub fn line_above_signal(&self) -> bool {
        self.macd > self.signal
    }

    pub fn line_below_signal(&self) -> bool {
        self.macd < self.signal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtrIndicator {
    pub value: f64,
    pub period: usize,
}

/// Directional movement index: +DI, -DI and trend strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdxIndicator {
    pub value: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub period: usize,
}

/// Everything the classifiers read, recomputed for every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub price: f64,
    pub rsi: RsiIndicator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emas: Vec<EmaIndicator>,
    pub macd: MacdIndicator,
    pub atr: AtrIndicator,
    pub adx: AdxIndicator,
}

impl IndicatorSet {
    pub fn ema(&self, period: usize) -> Option<f64> {
        self.emas
            .iter()
            .find(|ema| ema.period == period)
            .map(|ema| ema.value)
    }
}
