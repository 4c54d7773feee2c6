//! RSI (Relative Strength Index) indicator

use crate::indicators::IndicatorError;
use crate::models::indicators::RsiIndicator;

/// Largest RSI a window with at least one loss can report. Without the cap a
/// loss that is tiny next to the gains rounds `100 - 100 / (1 + RS)` up to 100.
pub const MAX_RSI_WITH_LOSS: f64 = 100.0 - 100.0 * f64::EPSILON;

/// Calculate RSI over the trailing `period + 1` closes.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Both averages divide by `period`, not by the number of gaining or losing
/// steps. A window without losses is maximal momentum: RSI = 100, and only
/// such a window reaches 100.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Result<RsiIndicator, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator: "rsi" });
    }
    if closes.len() < period + 1 {
        return Err(IndicatorError::insufficient("rsi", period + 1, closes.len()));
    }

    let window = &closes[closes.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    if losses == 0.0 {
        return Ok(RsiIndicator {
            value: 100.0,
            period,
        });
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Ok(RsiIndicator {
        value: rsi.clamp(0.0, MAX_RSI_WITH_LOSS),
        period,
    })
}
