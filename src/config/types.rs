use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::indicators::{AdxMode, MacdSignalMode};
use crate::models::rules::PredictionTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bar interval label passed to the market data source (e.g. `1h`).
    pub interval: String,
    /// Candles fetched and evaluated per instrument.
    pub window_length: usize,
    pub rsi_period: usize,
    /// Extra EMAs reported in the indicator set.
    pub ema_periods: Vec<usize>,
    pub macd: MacdConfig,
    pub atr_period: usize,
    pub adx: AdxConfig,
    pub scoring: ScoringConfig,
    pub quality: QualityBands,
    pub risk: RiskConfig,
    pub prediction: PredictionTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: "1h".to_string(),
            window_length: 30,
            rsi_period: 14,
            ema_periods: Vec::new(),
            macd: MacdConfig::default(),
            atr_period: 14,
            adx: AdxConfig::default(),
            scoring: ScoringConfig::default(),
            quality: QualityBands::default(),
            risk: RiskConfig::default(),
            prediction: PredictionTable::default(),
        }
    }
}

impl Config {
    /// Smallest candle window every configured indicator can be computed on:
    /// one more than the largest configured period, or more when Historical
    /// MACD or Smoothed ADX need a longer history.
    pub fn required_candles(&self) -> usize {
        let largest_period = [
            self.rsi_period,
            self.atr_period,
            self.adx.period,
            self.macd.fast_period,
            self.macd.slow_period,
        ]
        .into_iter()
        .chain(self.ema_periods.iter().copied())
        .max()
        .unwrap_or(0);

        let macd = self.macd.signal_mode.required_len(
            self.macd.slow_period.max(self.macd.fast_period),
            self.macd.signal_period,
        );

        [
            largest_period + 1,
            self.adx.mode.required_len(self.adx.period),
            macd,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacdConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
    pub signal_mode: MacdSignalMode,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            signal_mode: MacdSignalMode::Replicated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdxConfig {
    pub period: usize,
    pub mode: AdxMode,
}

impl Default for AdxConfig {
    fn default() -> Self {
        Self {
            period: 14,
            mode: AdxMode::SinglePoint,
        }
    }
}

/// Whether the composite score keeps its sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    #[default]
    Signed,
    Magnitude,
}

impl FromStr for ScoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "signed" => Ok(Self::Signed),
            "magnitude" | "abs" | "absolute" => Ok(Self::Magnitude),
            other => Err(format!("unknown score mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightSplit {
    pub rsi: f64,
    pub positioning: f64,
}

impl WeightSplit {
    pub const fn new(rsi: f64, positioning: f64) -> Self {
        Self { rsi, positioning }
    }
}

/// Zones and weight shifts of the composite scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub mode: ScoreMode,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub overbought_split: WeightSplit,
    pub oversold_split: WeightSplit,
    pub neutral_split: WeightSplit,
    pub ratio_high: f64,
    pub ratio_low: f64,
    pub ratio_shift: f64,
    pub rating_high: f64,
    pub rating_low: f64,
    pub rating_shift: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoreMode::Signed,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            overbought_split: WeightSplit::new(0.7, 0.3),
            oversold_split: WeightSplit::new(0.3, 0.7),
            neutral_split: WeightSplit::new(0.5, 0.5),
            ratio_high: 1.5,
            ratio_low: 0.5,
            ratio_shift: 0.1,
            rating_high: 7.0,
            rating_low: 3.0,
            rating_shift: 0.05,
        }
    }
}

/// Entry band of one quality tier: `rating >= min_rating && rsi < max_rsi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierBand {
    pub min_rating: f64,
    pub max_rsi: f64,
    /// Additionally require the MACD line above the signal line.
    #[serde(default)]
    pub require_macd_above_signal: bool,
}

/// Bands for 4CR, 3CR and 2CR; anything else is 1CR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityBands {
    pub cr4: TierBand,
    pub cr3: TierBand,
    pub cr2: TierBand,
}

impl Default for QualityBands {
    fn default() -> Self {
        Self {
            cr4: TierBand {
                min_rating: 7.0,
                max_rsi: 30.0,
                require_macd_above_signal: false,
            },
            cr3: TierBand {
                min_rating: 5.0,
                max_rsi: 50.0,
                require_macd_above_signal: true,
            },
            cr2: TierBand {
                min_rating: 3.0,
                max_rsi: 70.0,
                require_macd_above_signal: false,
            },
        }
    }
}

/// ATR/ADX thresholds selecting the stop-loss distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegimeBands {
    pub wide_min_atr: f64,
    pub wide_min_adx: f64,
    pub tight_max_atr: f64,
    pub tight_max_adx: f64,
    pub wide_multiplier: f64,
    pub standard_multiplier: f64,
    pub tight_multiplier: f64,
}

impl Default for RegimeBands {
    fn default() -> Self {
        Self {
            wide_min_atr: 2.0,
            wide_min_adx: 25.0,
            tight_max_atr: 1.5,
            tight_max_adx: 20.0,
            wide_multiplier: 2.0,
            standard_multiplier: 1.0,
            tight_multiplier: 0.5,
        }
    }
}

/// Ratcheting stop: never below `price * (1 - floor_pct / 100)` or the previous stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatchetConfig {
    pub floor_pct: f64,
}

impl Default for RatchetConfig {
    fn default() -> Self {
        Self { floor_pct: 5.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    pub risk_reward_ratio: f64,
    /// Fixed trailing stop distance reported next to the stop-loss.
    pub trailing_pct: Option<f64>,
    pub ratchet: Option<RatchetConfig>,
    pub regime: RegimeBands,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_reward_ratio: 2.0,
            trailing_pct: Some(5.0),
            ratchet: None,
            regime: RegimeBands::default(),
        }
    }
}
