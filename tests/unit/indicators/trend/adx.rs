//! Unit tests for ADX indicator

use crowdscan::indicators::{calculate_adx, AdxMode, IndicatorError};

use crate::fixtures::{assert_close, falling_candles, rising_candles};
use crowdscan::models::indicators::Candle;

fn series(candles: &[Candle]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    (
        candles.iter().map(|c| c.high).collect(),
        candles.iter().map(|c| c.low).collect(),
        candles.iter().map(|c| c.close).collect(),
    )
}

#[test]
fn test_adx_steady_uptrend() {
    let (highs, lows, closes) = series(&rising_candles(15));
    let adx = calculate_adx(&highs, &lows, &closes, 14, AdxMode::SinglePoint).unwrap();

    // TR is 1.5 per bar, +DM is 1.
    assert_close(adx.plus_di, 100.0 / 1.5);
    assert_eq!(adx.minus_di, 0.0);
    assert_close(adx.value, 100.0);
}

#[test]
fn test_adx_steady_downtrend() {
    let (highs, lows, closes) = series(&falling_candles(15));
    let adx = calculate_adx(&highs, &lows, &closes, 14, AdxMode::SinglePoint).unwrap();

    assert_eq!(adx.plus_di, 0.0);
    assert!(adx.minus_di > 0.0);
    assert_close(adx.value, 100.0);
}

#[test]
fn test_adx_flat_market_is_zero() {
    let flat = vec![10.0; 20];
    let adx = calculate_adx(&flat, &flat, &flat, 14, AdxMode::SinglePoint).unwrap();
    assert_eq!(adx.value, 0.0);
    assert_eq!(adx.plus_di, 0.0);
    assert_eq!(adx.minus_di, 0.0);
}

#[test]
fn test_adx_alternating_market_has_no_trend() {
    let highs: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 11.0 } else { 12.0 }).collect();
    let lows: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 9.0 } else { 10.0 }).collect();
    let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();

    let adx = calculate_adx(&highs, &lows, &closes, 14, AdxMode::SinglePoint).unwrap();
    assert_close(adx.plus_di, adx.minus_di);
    assert_close(adx.value, 0.0);
}

#[test]
fn test_adx_smoothed_needs_two_periods() {
    let (highs, lows, closes) = series(&rising_candles(27));
    assert_eq!(
        calculate_adx(&highs, &lows, &closes, 14, AdxMode::Smoothed),
        Err(IndicatorError::InsufficientData {
            indicator: "adx",
            required: 28,
            available: 27,
        })
    );

    let (highs, lows, closes) = series(&rising_candles(28));
    let adx = calculate_adx(&highs, &lows, &closes, 14, AdxMode::Smoothed).unwrap();
    assert_close(adx.value, 100.0);
}

#[test]
fn test_adx_smoothed_lags_trend_reversal() {
    let mut candles = rising_candles(30);
    let last = candles.last().unwrap().close;
    let mut reversal = falling_candles(8);
    let shift = last - reversal[0].close;
    for candle in &mut reversal {
        candle.open += shift;
        candle.high += shift;
        candle.low += shift;
        candle.close += shift;
    }
    candles.extend(reversal);

    let (highs, lows, closes) = series(&candles);
    let single = calculate_adx(&highs, &lows, &closes, 14, AdxMode::SinglePoint).unwrap();
    let smoothed = calculate_adx(&highs, &lows, &closes, 14, AdxMode::Smoothed).unwrap();
    assert!(smoothed.value > single.value);
}

#[test]
fn test_adx_length_mismatch() {
    let values = vec![1.0; 20];
    assert_eq!(
        calculate_adx(&values, &values[..19], &values, 14, AdxMode::SinglePoint),
        Err(IndicatorError::LengthMismatch { indicator: "adx" })
    );
}
