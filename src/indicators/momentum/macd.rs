//! MACD (Moving Average Convergence Divergence) indicator

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::indicators::IndicatorError;
use crate::models::indicators::MacdIndicator;

/// How the signal line is derived from the MACD line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignalMode {
    /// EMA over `signal_period` copies of the latest MACD value.
    ///
    /// An EMA of a constant run is that constant, so the signal line always
    /// equals the MACD line and the histogram is zero. Line-vs-signal
    /// comparisons therefore never hold in this mode.
    #[default]
    Replicated,
    /// EMA over the historical MACD series.
    Historical,
}

impl MacdSignalMode {
    /// Closes needed for the given periods.
    pub fn required_len(&self, slow_period: usize, signal_period: usize) -> usize {
        match self {
            Self::Replicated => slow_period,
            Self::Historical => slow_period + signal_period - 1,
        }
    }
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD, per `mode`
/// Histogram = MACD - Signal
pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    mode: MacdSignalMode,
) -> Result<MacdIndicator, IndicatorError> {
    if fast_period == 0 || slow_period == 0 || signal_period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator: "macd" });
    }

    let required = mode.required_len(slow_period.max(fast_period), signal_period);
    if closes.len() < required {
        return Err(IndicatorError::insufficient("macd", required, closes.len()));
    }

    let fast = math::ema_series(closes, fast_period)
        .ok_or_else(|| IndicatorError::insufficient("macd", fast_period, closes.len()))?;
    let slow = math::ema_series(closes, slow_period)
        .ok_or_else(|| IndicatorError::insufficient("macd", slow_period, closes.len()))?;

    // Align both series on the newest value; the shorter one bounds the history.
    let history_len = fast.len().min(slow.len());
    let macd_values: Vec<f64> = fast[fast.len() - history_len..]
        .iter()
        .zip(&slow[slow.len() - history_len..])
        .map(|(fast, slow)| fast - slow)
        .collect();

    let macd_line = *macd_values
        .last()
        .ok_or_else(|| IndicatorError::insufficient("macd", required, closes.len()))?;

    let signal_line = match mode {
        MacdSignalMode::Replicated => math::ema(&vec![macd_line; signal_period], signal_period),
        MacdSignalMode::Historical => math::ema(&macd_values, signal_period),
    }
    .ok_or_else(|| IndicatorError::insufficient("macd", required, closes.len()))?;

    Ok(MacdIndicator {
        macd: macd_line,
        signal: signal_line,
        histogram: macd_line - signal_line,
        period: (fast_period, slow_period, signal_period),
    })
}
