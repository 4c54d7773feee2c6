//! Moving averages and range helpers over `f64` series ordered oldest to newest.

/// Arithmetic mean, accumulated relative to the first element.
///
/// Summing offsets instead of raw values keeps a constant series bit-exact:
/// the mean of `[c, c, c]` is exactly `c`.
pub fn mean(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    let offset: f64 = values.iter().map(|v| v - first).sum();
    Some(first + offset / values.len() as f64)
}

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// One EMA step: `(value - previous) * 2 / (period + 1) + previous`.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let multiplier = 2.0 / (period as f64 + 1.0);
    (value - previous) * multiplier + previous
}

/// EMA series seeded with the mean of the first `period` values.
///
/// The first element corresponds to index `period - 1` of the input.
pub fn ema_series(values: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || values.len() < period {
        return None;
    }

    let mut current = mean(&values[..period])?;
    let mut series = Vec::with_capacity(values.len() - period + 1);
    series.push(current);

    for &value in &values[period..] {
        current = ema_from_previous(value, current, period);
        series.push(current);
    }

    Some(series)
}

/// Latest EMA value.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period)?.last().copied()
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}
