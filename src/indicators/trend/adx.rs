//! ADX (Average Directional Index) indicator

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::indicators::IndicatorError;
use crate::models::indicators::AdxIndicator;

/// How trend strength is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdxMode {
    /// ADX is the DX of the trailing period: a single-point estimate.
    #[default]
    SinglePoint,
    /// Wilder-smoothed average of the rolling DX series.
    Smoothed,
}

impl AdxMode {
    pub fn required_len(&self, period: usize) -> usize {
        match self {
            Self::SinglePoint => period + 1,
            Self::Smoothed => 2 * period,
        }
    }
}

/// Per-bar true range and directional movement, one entry per candle after the first.
struct DirectionalMovement {
    tr: Vec<f64>,
    plus_dm: Vec<f64>,
    minus_dm: Vec<f64>,
}

impl DirectionalMovement {
    fn from_bars(highs: &[f64], lows: &[f64], closes: &[f64]) -> Self {
        let len = closes.len().saturating_sub(1);
        let mut movement = Self {
            tr: Vec::with_capacity(len),
            plus_dm: Vec::with_capacity(len),
            minus_dm: Vec::with_capacity(len),
        };

        for i in 1..closes.len() {
            movement
                .tr
                .push(math::true_range(highs[i], lows[i], closes[i - 1]));

            let up_move = highs[i] - highs[i - 1];
            let down_move = lows[i - 1] - lows[i];

            // Only the dominant direction counts.
            movement.plus_dm.push(if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            });
            movement.minus_dm.push(if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            });
        }

        movement
    }

    /// (+DI, -DI, DX) over `[end - period, end)`.
    fn window(&self, end: usize, period: usize) -> (f64, f64, f64) {
        let range = end - period..end;
        let tr_sum: f64 = self.tr[range.clone()].iter().sum();
        let plus_sum: f64 = self.plus_dm[range.clone()].iter().sum();
        let minus_sum: f64 = self.minus_dm[range].iter().sum();

        let (plus_di, minus_di) = if tr_sum > 0.0 {
            (100.0 * plus_sum / tr_sum, 100.0 * minus_sum / tr_sum)
        } else {
            (0.0, 0.0)
        };

        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            100.0 * (plus_di - minus_di).abs() / di_sum
        } else {
            0.0
        };

        (plus_di, minus_di, dx)
    }
}

/// Calculate +DI, -DI and ADX.
///
/// ADX measures trend strength regardless of direction. Zero true range or a
/// zero DI sum resolve to 0 rather than dividing by zero.
pub fn calculate_adx(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    mode: AdxMode,
) -> Result<AdxIndicator, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator: "adx" });
    }
    if highs.len() != closes.len() || lows.len() != closes.len() {
        return Err(IndicatorError::LengthMismatch { indicator: "adx" });
    }

    let required = mode.required_len(period);
    if closes.len() < required {
        return Err(IndicatorError::insufficient("adx", required, closes.len()));
    }

    let movement = DirectionalMovement::from_bars(highs, lows, closes);
    let bars = movement.tr.len();
    let (plus_di, minus_di, dx) = movement.window(bars, period);

    let value = match mode {
        AdxMode::SinglePoint => dx,
        AdxMode::Smoothed => {
            let dx_series: Vec<f64> = (period..=bars)
                .map(|end| movement.window(end, period).2)
                .collect();
            let seed = math::mean(&dx_series[..period])
                .ok_or_else(|| IndicatorError::insufficient("adx", required, closes.len()))?;
            dx_series[period..].iter().fold(seed, |adx, dx| {
                (adx * (period as f64 - 1.0) + dx) / period as f64
            })
        }
    };

    Ok(AdxIndicator {
        value,
        plus_di,
        minus_di,
        period,
    })
}
