//! Unit tests for EMA indicator

use crowdscan::indicators::{calculate_ema, calculate_emas, IndicatorError};

use crate::fixtures::linear_closes;

#[test]
fn test_ema_insufficient_data() {
    let closes = linear_closes(100.0, 0.1, 10);
    assert_eq!(
        calculate_ema(&closes, 20),
        Err(IndicatorError::InsufficientData {
            indicator: "ema",
            required: 20,
            available: 10,
        })
    );
}

#[test]
fn test_ema_constant_series_is_constant() {
    let closes = vec![0.3; 50];
    let ema = calculate_ema(&closes, 12).unwrap();
    assert_eq!(ema.value, 0.3);
    assert_eq!(ema.period, 12);
}

#[test]
fn test_ema_known_value() {
    let ema = calculate_ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
    assert_eq!(ema.value, 4.0);
}

#[test]
fn test_ema_lags_uptrend() {
    let closes = linear_closes(100.0, 1.0, 60);
    let ema = calculate_ema(&closes, 20).unwrap();
    assert!(ema.value < *closes.last().unwrap());
    assert!(ema.value > closes[closes.len() - 20]);
}

#[test]
fn test_calculate_multiple_emas() {
    let closes = linear_closes(100.0, 0.1, 250);
    let emas = calculate_emas(&closes, &[12, 26, 50, 200]).unwrap();
    let periods: Vec<usize> = emas.iter().map(|ema| ema.period).collect();
    assert_eq!(periods, vec![12, 26, 50, 200]);
}

#[test]
fn test_calculate_emas_fails_on_any_long_period() {
    let closes = linear_closes(100.0, 0.1, 30);
    assert!(calculate_emas(&closes, &[12, 50]).is_err());
}
