//! Stop-loss, trailing stop and profit target derivation.

use crate::config::{RatchetConfig, RegimeBands, RiskConfig};
use crate::models::evaluation::{QualityTier, RiskLevels, StopRegime, TradeDirection};

/// Wide when volatile and trending, tight when quiet or trendless, standard otherwise.
pub fn select_regime(atr: f64, adx: f64, bands: &RegimeBands) -> StopRegime {
    if atr > bands.wide_min_atr && adx > bands.wide_min_adx {
        StopRegime::Wide
    } else if atr < bands.tight_max_atr || adx < bands.tight_max_adx {
        StopRegime::Tight
    } else {
        StopRegime::Standard
    }
}

/// `price - multiplier * atr` for the selected regime.
pub fn regime_stop(price: f64, atr: f64, adx: f64, bands: &RegimeBands) -> (f64, StopRegime) {
    let regime = select_regime(atr, adx, bands);
    let multiplier = match regime {
        StopRegime::Wide => bands.wide_multiplier,
        StopRegime::Standard => bands.standard_multiplier,
        StopRegime::Tight => bands.tight_multiplier,
    };
    (price - multiplier * atr, regime)
}

/// Ratcheted stop: the larger of the regime stop and the trailing candidate,
/// where the candidate never falls below `previous_stop`.
pub fn ratchet_stop(
    price: f64,
    regime_stop: f64,
    previous_stop: Option<f64>,
    ratchet: &RatchetConfig,
) -> f64 {
    let floor = price * (1.0 - ratchet.floor_pct / 100.0);
    let candidate = previous_stop.map_or(floor, |previous| previous.max(floor));
    regime_stop.max(candidate)
}

/// Fixed-percentage trailing stop below the current price.
pub fn trailing_stop(price: f64, trail_pct: f64) -> f64 {
    price * (1.0 - trail_pct / 100.0)
}

/// Target `risk_reward_ratio` risk-distances from entry, above for longs and
/// below for shorts, plus its distance from entry in percent.
///
/// A stop at the entry price carries no risk distance and yields no target.
pub fn profit_target(
    entry: f64,
    stop_loss: f64,
    risk_reward_ratio: f64,
    direction: TradeDirection,
) -> (Option<f64>, f64) {
    let risk = (entry - stop_loss).abs();
    if risk == 0.0 || entry <= 0.0 {
        return (None, 0.0);
    }

    let target = match direction {
        TradeDirection::Long => entry + risk * risk_reward_ratio,
        TradeDirection::Short => entry - risk * risk_reward_ratio,
    };
    let percentage_change = (target - entry).abs() / entry * 100.0;

    (Some(target), percentage_change)
}

pub struct RiskManager<'a> {
    config: &'a RiskConfig,
}

impl<'a> RiskManager<'a> {
    pub fn new(config: &'a RiskConfig) -> Self {
        Self { config }
    }

    /// Derive all risk levels for one entry at `price`.
    ///
    /// `previous_stop` only matters when a ratchet is configured; the scanner
    /// keeps no state across runs and passes `None`.
    pub fn assess(
        &self,
        price: f64,
        atr: f64,
        adx: f64,
        tier: QualityTier,
        previous_stop: Option<f64>,
    ) -> RiskLevels {
        let (mut stop_loss, regime) = regime_stop(price, atr, adx, &self.config.regime);
        if let Some(ratchet) = &self.config.ratchet {
            stop_loss = ratchet_stop(price, stop_loss, previous_stop, ratchet);
        }

        let direction = if tier.is_bullish() {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        };
        let (target, percentage_change) =
            profit_target(price, stop_loss, self.config.risk_reward_ratio, direction);

        RiskLevels {
            stop_loss,
            regime,
            trailing_stop: self.config.trailing_pct.map(|pct| trailing_stop(price, pct)),
            direction,
            profit_target: target,
            percentage_change,
        }
    }
}
