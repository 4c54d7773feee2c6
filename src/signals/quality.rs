//! Signal quality tiers.

use crate::config::{QualityBands, TierBand};
use crate::models::evaluation::QualityTier;
use crate::models::indicators::MacdIndicator;

fn band_matches(band: &TierBand, rating: f64, rsi: f64, macd: &MacdIndicator) -> bool {
    rating >= band.min_rating
        && rsi < band.max_rsi
        && (!band.require_macd_above_signal || macd.line_above_signal())
}

/// Most stringent tier first; the first band that matches wins.
pub fn classify_quality(
    rating: f64,
    rsi: f64,
    macd: &MacdIndicator,
    bands: &QualityBands,
) -> QualityTier {
    if band_matches(&bands.cr4, rating, rsi, macd) {
        QualityTier::Cr4
    } else if band_matches(&bands.cr3, rating, rsi, macd) {
        QualityTier::Cr3
    } else if band_matches(&bands.cr2, rating, rsi, macd) {
        QualityTier::Cr2
    } else {
        QualityTier::Cr1
    }
}
