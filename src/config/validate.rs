use crate::config::types::{Config, TierBand};
use crate::error::ConfigError;
use crate::models::rules::{Band, PredictionTable};

impl Config {
    /// Reject configurations the engine cannot evaluate consistently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.trim().is_empty() {
            return invalid("interval must not be empty");
        }

        for (name, period) in [
            ("rsi_period", self.rsi_period),
            ("atr_period", self.atr_period),
            ("adx.period", self.adx.period),
            ("macd.fast_period", self.macd.fast_period),
            ("macd.slow_period", self.macd.slow_period),
            ("macd.signal_period", self.macd.signal_period),
        ] {
            if period == 0 {
                return invalid(format!("{} must be greater than zero", name));
            }
        }
        if self.ema_periods.contains(&0) {
            return invalid("ema_periods must not contain zero");
        }
        if self.macd.fast_period >= self.macd.slow_period {
            return invalid(format!(
                "macd.fast_period ({}) must be below macd.slow_period ({})",
                self.macd.fast_period, self.macd.slow_period
            ));
        }

        let required = self.required_candles();
        if self.window_length < required {
            return invalid(format!(
                "window_length {} is shorter than the {} candles the configured indicators need",
                self.window_length, required
            ));
        }

        self.validate_scoring()?;
        self.validate_quality()?;
        self.validate_risk()?;
        validate_prediction(&self.prediction)
    }

    fn validate_scoring(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;
        let values = [
            scoring.rsi_overbought,
            scoring.rsi_oversold,
            scoring.overbought_split.rsi,
            scoring.overbought_split.positioning,
            scoring.oversold_split.rsi,
            scoring.oversold_split.positioning,
            scoring.neutral_split.rsi,
            scoring.neutral_split.positioning,
            scoring.ratio_high,
            scoring.ratio_low,
            scoring.ratio_shift,
            scoring.rating_high,
            scoring.rating_low,
            scoring.rating_shift,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return invalid("scoring values must be finite");
        }
        if scoring.rsi_oversold > scoring.rsi_overbought {
            return invalid("scoring.rsi_oversold must not exceed scoring.rsi_overbought");
        }
        if scoring.ratio_low > scoring.ratio_high || scoring.rating_low > scoring.rating_high {
            return invalid("scoring low zones must not exceed their high zones");
        }
        Ok(())
    }

    /// Bands must loosen from 4CR down to 2CR: a lower tier never asks for a
    /// higher rating or a lower RSI than the tier above it.
    fn validate_quality(&self) -> Result<(), ConfigError> {
        let bands: [(&str, &TierBand); 3] = [
            ("4CR", &self.quality.cr4),
            ("3CR", &self.quality.cr3),
            ("2CR", &self.quality.cr2),
        ];

        for (tier, band) in bands {
            if !band.min_rating.is_finite() || !band.max_rsi.is_finite() {
                return invalid(format!("quality band {} must be finite", tier));
            }
        }

        for pair in bands.windows(2) {
            let (upper_name, upper) = pair[0];
            let (lower_name, lower) = pair[1];
            if upper.min_rating < lower.min_rating || upper.max_rsi > lower.max_rsi {
                return invalid(format!(
                    "quality band {} must be at least as strict as {}",
                    upper_name, lower_name
                ));
            }
        }
        Ok(())
    }

    fn validate_risk(&self) -> Result<(), ConfigError> {
        let risk = &self.risk;
        if !risk.risk_reward_ratio.is_finite() || risk.risk_reward_ratio <= 0.0 {
            return invalid("risk.risk_reward_ratio must be a positive number");
        }
        if let Some(pct) = risk.trailing_pct {
            if !(pct > 0.0 && pct < 100.0) {
                return invalid("risk.trailing_pct must be within (0, 100)");
            }
        }
        if let Some(ratchet) = risk.ratchet {
            if !(ratchet.floor_pct > 0.0 && ratchet.floor_pct < 100.0) {
                return invalid("risk.ratchet.floor_pct must be within (0, 100)");
            }
        }
        let regime = &risk.regime;
        let values = [
            regime.wide_min_atr,
            regime.wide_min_adx,
            regime.tight_max_atr,
            regime.tight_max_adx,
            regime.wide_multiplier,
            regime.standard_multiplier,
            regime.tight_multiplier,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return invalid("risk.regime values must be finite and non-negative");
        }
        Ok(())
    }
}

fn validate_prediction(table: &PredictionTable) -> Result<(), ConfigError> {
    if table.fallback_label.trim().is_empty() {
        return invalid("prediction.fallback_label must not be empty");
    }
    if let Some(gate) = &table.trend_gate {
        if !gate.min_adx.is_finite() || gate.label.trim().is_empty() {
            return invalid("prediction.trend_gate needs a finite min_adx and a label");
        }
    }

    for (index, rule) in table.rules.iter().enumerate() {
        if rule.label.trim().is_empty() {
            return invalid(format!("prediction rule #{} has an empty label", index));
        }
        let when = &rule.when;
        let bands = [when.rsi, when.rating, when.score, when.percentage_change];
        if !bands.iter().flatten().all(band_is_finite)
            || when.min_adx.is_some_and(|adx| !adx.is_finite())
        {
            return invalid(format!(
                "prediction rule '{}' has a non-finite bound",
                rule.label
            ));
        }
        for (field, band) in [
            ("rsi", when.rsi),
            ("rating", when.rating),
            ("score", when.score),
            ("percentage_change", when.percentage_change),
        ] {
            if band.is_some_and(|band| !band.is_satisfiable()) {
                return invalid(format!(
                    "prediction rule '{}' has an empty {} band",
                    rule.label, field
                ));
            }
        }
    }
    Ok(())
}

fn band_is_finite(band: &Band) -> bool {
    [band.above, band.at_least, band.below, band.at_most]
        .iter()
        .flatten()
        .all(|bound| bound.is_finite())
}

fn invalid<T>(message: impl Into<String>) -> Result<T, ConfigError> {
    Err(ConfigError::Invalid(message.into()))
}
