//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::IndicatorError;
use crate::models::indicators::EmaIndicator;

/// Calculate EMA for a specific period.
///
/// Fails when the period exceeds the number of closes.
pub fn calculate_ema(closes: &[f64], period: usize) -> Result<EmaIndicator, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator: "ema" });
    }

    let value = math::ema(closes, period)
        .ok_or_else(|| IndicatorError::insufficient("ema", period, closes.len()))?;

    Ok(EmaIndicator { value, period })
}

/// Calculate multiple EMAs at once
pub fn calculate_emas(closes: &[f64], periods: &[usize]) -> Result<Vec<EmaIndicator>, IndicatorError> {
    periods
        .iter()
        .map(|&period| calculate_ema(closes, period))
        .collect()
}
