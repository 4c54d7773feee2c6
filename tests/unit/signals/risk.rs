//! Unit tests for stop-loss and profit target derivation

use crowdscan::config::{RatchetConfig, RegimeBands, RiskConfig};
use crowdscan::models::evaluation::{QualityTier, StopRegime, TradeDirection};
use crowdscan::signals::{
    profit_target, ratchet_stop, regime_stop, select_regime, trailing_stop, RiskManager,
};

use crate::fixtures::assert_close;

#[test]
fn test_regime_selection() {
    let bands = RegimeBands::default();
    assert_eq!(select_regime(3.0, 30.0, &bands), StopRegime::Wide);
    assert_eq!(select_regime(1.0, 30.0, &bands), StopRegime::Tight);
    assert_eq!(select_regime(3.0, 15.0, &bands), StopRegime::Tight);
    assert_eq!(select_regime(1.8, 22.0, &bands), StopRegime::Standard);
    // Volatile but trendless is not wide.
    assert_eq!(select_regime(3.0, 22.0, &bands), StopRegime::Standard);
}

#[test]
fn test_wide_stop() {
    let (stop, regime) = regime_stop(100.0, 3.0, 30.0, &RegimeBands::default());
    assert_eq!(stop, 94.0);
    assert_eq!(regime, StopRegime::Wide);
}

#[test]
fn test_standard_and_tight_stops() {
    let bands = RegimeBands::default();
    assert_close(regime_stop(100.0, 1.8, 22.0, &bands).0, 98.2);
    assert_eq!(regime_stop(100.0, 1.0, 30.0, &bands).0, 99.5);
}

#[test]
fn test_ratchet_never_loosens() {
    let ratchet = RatchetConfig { floor_pct: 5.0 };
    // Floor at 95 beats the regime stop.
    assert_close(ratchet_stop(100.0, 94.0, None, &ratchet), 95.0);
    // A higher previous stop is kept.
    assert_close(ratchet_stop(100.0, 94.0, Some(97.0), &ratchet), 97.0);
    // A tighter regime stop wins over both.
    assert_close(ratchet_stop(100.0, 98.0, Some(97.0), &ratchet), 98.0);
}

#[test]
fn test_trailing_stop() {
    assert_close(trailing_stop(200.0, 5.0), 190.0);
}

#[test]
fn test_profit_target_long() {
    let (target, pct) = profit_target(100.0, 94.0, 2.0, TradeDirection::Long);
    assert_eq!(target, Some(112.0));
    assert_close(pct, 12.0);
}

#[test]
fn test_profit_target_short() {
    let (target, pct) = profit_target(100.0, 94.0, 2.0, TradeDirection::Short);
    assert_eq!(target, Some(88.0));
    assert_close(pct, 12.0);
}

#[test]
fn test_profit_target_zero_risk() {
    assert_eq!(
        profit_target(100.0, 100.0, 2.0, TradeDirection::Long),
        (None, 0.0)
    );
}

#[test]
fn test_risk_manager_direction_follows_tier() {
    let config = RiskConfig::default();
    let manager = RiskManager::new(&config);

    let long = manager.assess(100.0, 3.0, 30.0, QualityTier::Cr4, None);
    assert_eq!(long.direction, TradeDirection::Long);
    assert_eq!(long.stop_loss, 94.0);
    assert_eq!(long.regime, StopRegime::Wide);
    assert_eq!(long.profit_target, Some(112.0));
    assert_close(long.trailing_stop.unwrap(), 95.0);

    let short = manager.assess(100.0, 3.0, 30.0, QualityTier::Cr2, None);
    assert_eq!(short.direction, TradeDirection::Short);
    assert_eq!(short.profit_target, Some(88.0));
}

#[test]
fn test_risk_manager_with_ratchet() {
    let config = RiskConfig {
        ratchet: Some(RatchetConfig { floor_pct: 5.0 }),
        trailing_pct: None,
        ..RiskConfig::default()
    };
    let levels = RiskManager::new(&config).assess(100.0, 3.0, 30.0, QualityTier::Cr3, Some(96.0));
    assert_close(levels.stop_loss, 96.0);
    assert_close(levels.profit_target.unwrap(), 108.0);
    assert!(levels.trailing_stop.is_none());
}
