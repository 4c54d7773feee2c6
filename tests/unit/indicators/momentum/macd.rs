//! Unit tests for MACD indicator

use crowdscan::indicators::{calculate_macd, IndicatorError, MacdSignalMode};

use crate::fixtures::linear_closes;

#[test]
fn test_macd_replicated_signal_equals_line() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
    let macd = calculate_macd(&closes, 12, 26, 9, MacdSignalMode::Replicated).unwrap();

    assert_eq!(macd.signal, macd.macd);
    assert_eq!(macd.histogram, 0.0);
    assert!(!macd.line_above_signal());
    assert!(!macd.line_below_signal());
    assert_eq!(macd.period, (12, 26, 9));
}

#[test]
fn test_macd_constant_series_is_zero() {
    let closes = vec![250.0; 40];
    for mode in [MacdSignalMode::Replicated, MacdSignalMode::Historical] {
        let macd = calculate_macd(&closes, 12, 26, 9, mode).unwrap();
        assert_eq!(macd.macd, 0.0);
        assert_eq!(macd.signal, 0.0);
    }
}

#[test]
fn test_macd_uptrend_line_positive() {
    let closes = linear_closes(100.0, 1.0, 40);
    let macd = calculate_macd(&closes, 12, 26, 9, MacdSignalMode::Replicated).unwrap();
    assert!(macd.macd > 0.0);
}

#[test]
fn test_macd_historical_signal_lags_acceleration() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i * i) as f64 * 0.05).collect();
    let macd = calculate_macd(&closes, 12, 26, 9, MacdSignalMode::Historical).unwrap();

    assert!(macd.line_above_signal());
    assert!(macd.histogram > 0.0);
    assert_eq!(macd.histogram, macd.macd - macd.signal);
}

#[test]
fn test_macd_required_length_by_mode() {
    let closes = linear_closes(100.0, 1.0, 33);
    assert!(calculate_macd(&closes, 12, 26, 9, MacdSignalMode::Replicated).is_ok());
    assert_eq!(
        calculate_macd(&closes, 12, 26, 9, MacdSignalMode::Historical),
        Err(IndicatorError::InsufficientData {
            indicator: "macd",
            required: 34,
            available: 33,
        })
    );
}

#[test]
fn test_macd_insufficient_for_slow_period() {
    let closes = linear_closes(100.0, 1.0, 25);
    assert!(matches!(
        calculate_macd(&closes, 12, 26, 9, MacdSignalMode::Replicated),
        Err(IndicatorError::InsufficientData { required: 26, .. })
    ));
}
