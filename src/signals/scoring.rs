//! Composite score ("Score Code D") with dynamic RSI/positioning weights.

use crate::config::{ScoreMode, ScoringConfig, WeightSplit};
use crate::models::evaluation::Score;

/// Starting weight split chosen by RSI zone.
pub fn base_weights(rsi: f64, config: &ScoringConfig) -> WeightSplit {
    if rsi > config.rsi_overbought {
        config.overbought_split
    } else if rsi < config.rsi_oversold {
        config.oversold_split
    } else {
        config.neutral_split
    }
}

/// Shift weight between RSI and positioning by long/short ratio zone, then by
/// rating zone. Each shift moves the same amount from one side to the other.
pub fn adjusted_weights(rsi: f64, long_short_ratio: f64, rating: f64, config: &ScoringConfig) -> WeightSplit {
    let mut weights = base_weights(rsi, config);

    if long_short_ratio > config.ratio_high {
        weights.positioning += config.ratio_shift;
        weights.rsi -= config.ratio_shift;
    } else if long_short_ratio < config.ratio_low {
        weights.positioning -= config.ratio_shift;
        weights.rsi += config.ratio_shift;
    }

    if rating > config.rating_high {
        weights.positioning += config.rating_shift;
        weights.rsi -= config.rating_shift;
    } else if rating < config.rating_low {
        weights.positioning -= config.rating_shift;
        weights.rsi += config.rating_shift;
    }

    weights
}

/// `ratio * positioning_weight + (10 - rsi) * rsi_weight`, signed or as a
/// magnitude depending on `config.mode`.
pub fn composite_score(rsi: f64, long_short_ratio: f64, rating: f64, config: &ScoringConfig) -> Score {
    let weights = adjusted_weights(rsi, long_short_ratio, rating, config);
    let raw = long_short_ratio * weights.positioning + (10.0 - rsi) * weights.rsi;

    let composite = match config.mode {
        ScoreMode::Signed => raw,
        ScoreMode::Magnitude => raw.abs(),
    };

    Score {
        rating,
        composite,
        rsi_weight: weights.rsi,
        positioning_weight: weights.positioning,
    }
}
