//! Unit tests for configuration loading and validation

use crowdscan::config::{Config, RatchetConfig, ScoreMode, TierBand};
use crowdscan::error::ConfigError;
use crowdscan::indicators::{AdxMode, MacdSignalMode};
use crowdscan::models::rules::Band;
use std::io::Write;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.required_candles(), 27);
    assert_eq!(config.macd.signal_mode, MacdSignalMode::Replicated);
    assert_eq!(config.adx.mode, AdxMode::SinglePoint);
    assert_eq!(config.scoring.mode, ScoreMode::Signed);
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let config = Config::from_json(
        r#"{
            "interval": "4h",
            "window_length": 60,
            "ema_periods": [20, 50],
            "macd": { "signal_mode": "historical" },
            "adx": { "mode": "smoothed" },
            "scoring": { "mode": "magnitude" },
            "risk": { "risk_reward_ratio": 3.0, "ratchet": { "floor_pct": 4.0 } }
        }"#,
    )
    .unwrap();

    assert_eq!(config.interval, "4h");
    assert_eq!(config.window_length, 60);
    assert_eq!(config.ema_periods, vec![20, 50]);
    assert_eq!(config.macd.signal_mode, MacdSignalMode::Historical);
    assert_eq!(config.macd.slow_period, 26);
    assert_eq!(config.adx.mode, AdxMode::Smoothed);
    assert_eq!(config.scoring.mode, ScoreMode::Magnitude);
    assert_eq!(config.scoring.rsi_overbought, 70.0);
    assert_eq!(config.risk.risk_reward_ratio, 3.0);
    assert_eq!(config.risk.ratchet, Some(RatchetConfig { floor_pct: 4.0 }));
    assert_eq!(config.risk.trailing_pct, Some(5.0));
    assert_eq!(config.required_candles(), 51);
}

#[test]
fn test_unknown_field_is_rejected() {
    assert!(matches!(
        Config::from_json(r#"{ "windowLength": 30 }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_window_shorter_than_indicators_is_invalid() {
    let result = Config::from_json(r#"{ "window_length": 14 }"#);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_window_must_exceed_longest_period() {
    let mut config = Config::default();
    config.window_length = 26;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    config.window_length = 27;
    assert!(config.validate().is_ok());

    config.ema_periods = vec![30];
    config.window_length = 30;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    config.window_length = 31;
    assert!(config.validate().is_ok());
}

#[test]
fn test_historical_macd_raises_required_window() {
    let result = Config::from_json(r#"{ "macd": { "signal_mode": "historical" } }"#);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_invalid_periods() {
    for json in [
        r#"{ "rsi_period": 0 }"#,
        r#"{ "macd": { "fast_period": 26, "slow_period": 12 } }"#,
        r#"{ "ema_periods": [0] }"#,
        r#"{ "interval": " " }"#,
    ] {
        assert!(
            matches!(Config::from_json(json), Err(ConfigError::Invalid(_))),
            "{json} should be invalid"
        );
    }
}

#[test]
fn test_quality_bands_must_loosen() {
    let mut config = Config::default();
    config.quality.cr2 = TierBand {
        min_rating: 8.0,
        max_rsi: 70.0,
        require_macd_above_signal: false,
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_invalid_risk_settings() {
    let mut config = Config::default();
    config.risk.risk_reward_ratio = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.risk.trailing_pct = Some(100.0);
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.scoring.rsi_oversold = 80.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_rule_label_is_invalid() {
    let result = Config::from_json(r#"{ "prediction": { "rules": [ { "label": "" } ] } }"#);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_inverted_rule_band_is_invalid() {
    let result = Config::from_json(
        r#"{ "prediction": { "rules": [
            { "label": "Never", "when": { "rsi": { "above": 5.0, "below": 2.0 } } }
        ] } }"#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_band_satisfiability() {
    fn band(
        above: Option<f64>,
        at_least: Option<f64>,
        below: Option<f64>,
        at_most: Option<f64>,
    ) -> Band {
        Band {
            above,
            at_least,
            below,
            at_most,
        }
    }

    assert!(Band::default().is_satisfiable());
    assert!(Band::above_at_most(2.0, 5.0).is_satisfiable());
    assert!(band(None, Some(3.0), None, Some(3.0)).is_satisfiable());

    assert!(!band(Some(5.0), None, Some(2.0), None).is_satisfiable());
    assert!(!band(Some(3.0), None, None, Some(3.0)).is_satisfiable());
    assert!(!band(None, Some(3.0), Some(3.0), None).is_satisfiable());
    // the strict bound is the tighter one on a tie
    assert!(!band(Some(3.0), Some(3.0), None, Some(3.0)).is_satisfiable());
}

#[test]
fn test_score_mode_from_str() {
    assert_eq!("signed".parse::<ScoreMode>(), Ok(ScoreMode::Signed));
    assert_eq!("ABS".parse::<ScoreMode>(), Ok(ScoreMode::Magnitude));
    assert!("loud".parse::<ScoreMode>().is_err());
}

// The only test in this crate touching the process environment.
#[test]
fn test_load_file_then_env_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "interval": "15m", "window_length": 40 }}"#).unwrap();

    std::env::set_var("SCAN_WINDOW_LENGTH", "50");
    std::env::set_var("SCAN_RISK_REWARD_RATIO", "2.5");
    std::env::set_var("SCAN_SCORE_MODE", "magnitude");
    std::env::set_var("SCAN_TRAILING_PCT", "not-a-number");
    let loaded = Config::load(Some(file.path()));

    std::env::set_var("SCAN_WINDOW_LENGTH", "10");
    let too_short = Config::load(Some(file.path()));

    for key in [
        "SCAN_WINDOW_LENGTH",
        "SCAN_RISK_REWARD_RATIO",
        "SCAN_SCORE_MODE",
        "SCAN_TRAILING_PCT",
    ] {
        std::env::remove_var(key);
    }

    let config = loaded.unwrap();
    assert_eq!(config.interval, "15m");
    assert_eq!(config.window_length, 50);
    assert_eq!(config.risk.risk_reward_ratio, 2.5);
    assert_eq!(config.scoring.mode, ScoreMode::Magnitude);
    assert_eq!(config.risk.trailing_pct, Some(5.0));

    assert!(matches!(too_short, Err(ConfigError::Invalid(_))));

    let missing = Config::load(Some(std::path::Path::new("/nonexistent/crowdscan.json")));
    assert!(matches!(missing, Err(ConfigError::Read { .. })));
}
