//! Per-instrument evaluation pipeline.

use crate::config::Config;
use crate::error::EvaluationError;
use crate::indicators::compute_indicator_set;
use crate::models::evaluation::Evaluation;
use crate::models::indicators::{Candle, PositioningSample};
use crate::signals::positioning::positioning_rating;
use crate::signals::prediction::{PredictionClassifier, PredictionInputs};
use crate::signals::quality::classify_quality;
use crate::signals::risk::RiskManager;
use crate::signals::scoring::composite_score;

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate one instrument from its candle window and positioning sample.
    ///
    /// Uses the trailing `config.window_length` candles. Pure: the result
    /// depends only on the arguments, and its timestamp is the open time of
    /// the newest candle.
    pub fn evaluate(
        instrument: &str,
        candles: &[Candle],
        positioning: Option<&PositioningSample>,
        config: &Config,
    ) -> Result<Evaluation, EvaluationError> {
        let required = config.window_length.max(config.required_candles());
        if candles.len() < required {
            return Err(EvaluationError::InsufficientData {
                required,
                available: candles.len(),
            });
        }
        let positioning = positioning.ok_or(EvaluationError::MissingPositioning)?;

        let window = &candles[candles.len() - required..];
        validate_candles(window)?;
        validate_positioning(positioning)?;

        let newest = &window[window.len() - 1];
        let indicators = compute_indicator_set(window, config)?;
        let rsi = indicators.rsi.value;

        let rating = positioning_rating(positioning)?;
        let score = composite_score(rsi, positioning.long_short_ratio, rating, &config.scoring);
        let quality = classify_quality(rating, rsi, &indicators.macd, &config.quality);

        let risk = RiskManager::new(&config.risk).assess(
            indicators.price,
            indicators.atr.value,
            indicators.adx.value,
            quality,
            None,
        );

        let prediction = PredictionClassifier::classify(
            &config.prediction,
            &PredictionInputs {
                tier: quality,
                rsi,
                rating,
                score: score.composite,
                percentage_change: risk.percentage_change,
                macd: &indicators.macd,
                adx: &indicators.adx,
                profit_target: risk.profit_target,
            },
        );

        Ok(Evaluation {
            instrument: instrument.to_string(),
            interval: config.interval.clone(),
            timestamp: newest.open_time,
            price: indicators.price,
            long_short_ratio: positioning.long_short_ratio,
            indicators,
            score,
            quality,
            risk,
            prediction,
        })
    }
}

/// Reject windows with non-finite or negative fields, inverted ranges, or a
/// non-positive close.
pub fn validate_candles(candles: &[Candle]) -> Result<(), EvaluationError> {
    for (index, candle) in candles.iter().enumerate() {
        let fields = [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
            ("volume", candle.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EvaluationError::malformed(
                    format!("candle[{}].{}", index, name),
                    format!("{}", value),
                ));
            }
        }
        if candle.high < candle.low {
            return Err(EvaluationError::malformed(
                format!("candle[{}]", index),
                format!("high {} below low {}", candle.high, candle.low),
            ));
        }
        if candle.close <= 0.0 {
            return Err(EvaluationError::malformed(
                format!("candle[{}].close", index),
                "price must be positive",
            ));
        }
    }
    Ok(())
}

pub fn validate_positioning(sample: &PositioningSample) -> Result<(), EvaluationError> {
    if !sample.long_short_ratio.is_finite() || sample.long_short_ratio < 0.0 {
        return Err(EvaluationError::malformed(
            "long_short_ratio",
            format!("{}", sample.long_short_ratio),
        ));
    }
    Ok(())
}
