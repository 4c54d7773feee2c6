//! Crowd positioning rating.

use crate::error::EvaluationError;
use crate::models::indicators::PositioningSample;

/// Rating on a 0-10 scale: `long / (long + short) * 10`.
///
/// Approaches 10 as the short side vanishes and 0 as the long side vanishes.
/// Negative or non-finite fractions, or an empty split, are malformed input.
pub fn positioning_rating(sample: &PositioningSample) -> Result<f64, EvaluationError> {
    let long = sample.long_account;
    let short = sample.short_account;

    if !long.is_finite() || long < 0.0 {
        return Err(EvaluationError::malformed("long_account", format!("{}", long)));
    }
    if !short.is_finite() || short < 0.0 {
        return Err(EvaluationError::malformed("short_account", format!("{}", short)));
    }

    let total = long + short;
    if total <= 0.0 {
        return Err(EvaluationError::malformed(
            "positioning",
            "long and short account fractions are both zero",
        ));
    }

    Ok(long / total * 10.0)
}
