//! Unit tests for ATR indicator

use crowdscan::indicators::{calculate_atr, IndicatorError};

use crate::fixtures::{assert_close, rising_candles};

#[test]
fn test_atr_of_steady_trend() {
    let candles = rising_candles(20);
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let atr = calculate_atr(&highs, &lows, &closes, 14).unwrap();
    assert_close(atr.value, 1.5);
    assert_eq!(atr.period, 14);
}

#[test]
fn test_atr_averages_last_period_ranges() {
    let highs = [10.0, 12.0, 11.0, 15.0];
    let lows = [9.0, 10.0, 10.0, 11.0];
    let closes = [9.5, 11.0, 10.5, 14.0];
    // TR: 2.5, 1.0, 4.5
    let atr = calculate_atr(&highs, &lows, &closes, 2).unwrap();
    assert_close(atr.value, 2.75);
}

#[test]
fn test_atr_zero_range_is_zero() {
    let flat = vec![5.0; 16];
    assert_eq!(calculate_atr(&flat, &flat, &flat, 14).unwrap().value, 0.0);
}

#[test]
fn test_atr_insufficient_data() {
    let flat = vec![5.0; 14];
    assert_eq!(
        calculate_atr(&flat, &flat, &flat, 14),
        Err(IndicatorError::InsufficientData {
            indicator: "atr",
            required: 15,
            available: 14,
        })
    );
}
