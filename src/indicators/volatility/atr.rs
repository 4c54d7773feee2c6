//! ATR (Average True Range) indicator

use crate::common::math;
use crate::indicators::IndicatorError;
use crate::models::indicators::AtrIndicator;

/// Calculate ATR as the simple mean of the last `period` true ranges.
///
/// ATR measures market volatility by averaging true range over a period
pub fn calculate_atr(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Result<AtrIndicator, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator: "atr" });
    }
    if highs.len() != closes.len() || lows.len() != closes.len() {
        return Err(IndicatorError::LengthMismatch { indicator: "atr" });
    }
    if closes.len() < period + 1 {
        return Err(IndicatorError::insufficient("atr", period + 1, closes.len()));
    }

    let tr_values: Vec<f64> = (1..closes.len())
        .map(|i| math::true_range(highs[i], lows[i], closes[i - 1]))
        .collect();

    let value = math::sma(&tr_values, period)
        .ok_or_else(|| IndicatorError::insufficient("atr", period + 1, closes.len()))?;

    Ok(AtrIndicator { value, period })
}
