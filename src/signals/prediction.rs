//! Prediction status: first-match evaluation of the configured rule table.

use crate::models::evaluation::{PredictionStatus, QualityTier};
use crate::models::indicators::{AdxIndicator, MacdIndicator};
use crate::models::rules::{
    DirectionalComparison, MacdRelation, PredictionRule, PredictionTable, RuleConditions,
};

/// Values a rule can guard on.
#[derive(Debug, Clone, Copy)]
pub struct PredictionInputs<'a> {
    pub tier: QualityTier,
    pub rsi: f64,
    pub rating: f64,
    pub score: f64,
    pub percentage_change: f64,
    pub macd: &'a MacdIndicator,
    pub adx: &'a AdxIndicator,
    pub profit_target: Option<f64>,
}

pub struct PredictionClassifier;

impl PredictionClassifier {
    /// Walk the table top to bottom and emit the first matching rule.
    ///
    /// With a trend gate configured, an ADX below the gate short-circuits to the
    /// gate label. No match yields the fallback label. Neither carries a target.
    pub fn classify(table: &PredictionTable, inputs: &PredictionInputs<'_>) -> PredictionStatus {
        if let Some(gate) = &table.trend_gate {
            if inputs.adx.value < gate.min_adx {
                return PredictionStatus {
                    label: gate.label.clone(),
                    profit_target: None,
                    rule_index: None,
                };
            }
        }

        table
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| Self::evaluate_conditions(&rule.when, inputs))
            .map(|(index, rule)| Self::emit(index, rule, inputs))
            .unwrap_or_else(|| PredictionStatus {
                label: table.fallback_label.clone(),
                profit_target: None,
                rule_index: None,
            })
    }

    fn emit(index: usize, rule: &PredictionRule, inputs: &PredictionInputs<'_>) -> PredictionStatus {
        PredictionStatus {
            label: rule.label.clone(),
            profit_target: if rule.emit_target {
                inputs.profit_target
            } else {
                None
            },
            rule_index: Some(index),
        }
    }

    /// Every set guard must hold.
    pub fn evaluate_conditions(when: &RuleConditions, inputs: &PredictionInputs<'_>) -> bool {
        (when.tiers.is_empty() || when.tiers.contains(&inputs.tier))
            && when.rsi.map_or(true, |band| band.contains(inputs.rsi))
            && when.rating.map_or(true, |band| band.contains(inputs.rating))
            && when.score.map_or(true, |band| band.contains(inputs.score))
            && when
                .percentage_change
                .map_or(true, |band| band.contains(inputs.percentage_change))
            && when.macd.map_or(true, |relation| match relation {
                MacdRelation::LineAboveSignal => inputs.macd.line_above_signal(),
                MacdRelation::LineBelowSignal => inputs.macd.line_below_signal(),
            })
            && when.directional.map_or(true, |comparison| match comparison {
                DirectionalComparison::PlusDiAbove => inputs.adx.plus_di > inputs.adx.minus_di,
                DirectionalComparison::MinusDiAbove => inputs.adx.minus_di > inputs.adx.plus_di,
            })
            && when.min_adx.map_or(true, |min| inputs.adx.value >= min)
    }
}
