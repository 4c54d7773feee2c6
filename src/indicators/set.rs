use crate::config::Config;
use crate::indicators::{calculate_adx, calculate_atr, calculate_emas, calculate_macd, calculate_rsi};
use crate::indicators::IndicatorError;
use crate::models::indicators::{Candle, IndicatorSet};

/// Compute every indicator the classifiers need from one candle window.
pub fn compute_indicator_set(
    candles: &[Candle],
    config: &Config,
) -> Result<IndicatorSet, IndicatorError> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let price = *closes
        .last()
        .ok_or_else(|| IndicatorError::insufficient("indicator set", 1, 0))?;

    let rsi = calculate_rsi(&closes, config.rsi_period)?;
    let emas = calculate_emas(&closes, &config.ema_periods)?;
    let macd = calculate_macd(
        &closes,
        config.macd.fast_period,
        config.macd.slow_period,
        config.macd.signal_period,
        config.macd.signal_mode,
    )?;
    let atr = calculate_atr(&highs, &lows, &closes, config.atr_period)?;
    let adx = calculate_adx(&highs, &lows, &closes, config.adx.period, config.adx.mode)?;

    Ok(IndicatorSet {
        price,
        rsi,
        emas,
        macd,
        atr,
        adx,
    })
}
