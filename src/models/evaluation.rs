//! Per-instrument engine output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::IndicatorSet;

/// Ordinal signal-quality tier. `Ord` follows reliability: `Cr1 < Cr4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    #[serde(rename = "1CR")]
    Cr1,
    #[serde(rename = "2CR")]
    Cr2,
    #[serde(rename = "3CR")]
    Cr3,
    #[serde(rename = "4CR")]
    Cr4,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [Self::Cr4, Self::Cr3, Self::Cr2, Self::Cr1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cr1 => "1CR",
            Self::Cr2 => "2CR",
            Self::Cr3 => "3CR",
            Self::Cr4 => "4CR",
        }
    }

    /// Tiers whose profit target sits above the entry price.
    pub fn is_bullish(&self) -> bool {
        matches!(self, Self::Cr4 | Self::Cr3)
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positioning rating, composite score and the weights that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub rating: f64,
    pub composite: f64,
    pub rsi_weight: f64,
    pub positioning_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopRegime {
    Wide,
    Standard,
    Tight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    Long,
    Short,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub regime: StopRegime,
    pub trailing_stop: Option<f64>,
    pub direction: TradeDirection,
    pub profit_target: Option<f64>,
    pub percentage_change: f64,
}

/// Final call emitted by the prediction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionStatus {
    pub label: String,
    pub profit_target: Option<f64>,
    /// Index of the matching rule; `None` for the fallback and trend-gate labels.
    pub rule_index: Option<usize>,
}

/// Terminal output for one instrument window. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub instrument: String,
    pub interval: String,
    /// Open time of the newest candle in the window.
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub long_short_ratio: f64,
    pub indicators: IndicatorSet,
    pub score: Score,
    pub quality: QualityTier,
    pub risk: RiskLevels,
    pub prediction: PredictionStatus,
}
