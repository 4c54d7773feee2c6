//! Prediction rule table data models.
//!
//! The table is plain data: it is deserialised from the scanner config so that
//! new threshold bands never require code changes.

use serde::{Deserialize, Serialize};

use crate::models::evaluation::QualityTier;

/// Numeric interval with independently strict or inclusive bounds.
///
/// Unset bounds are open, so `Band::default()` accepts every finite value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Band {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_least: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_most: Option<f64>,
}

impl Band {
    pub fn above(value: f64) -> Self {
        Self {
            above: Some(value),
            ..Self::default()
        }
    }

    pub fn below(value: f64) -> Self {
        Self {
            below: Some(value),
            ..Self::default()
        }
    }

    /// `(lower, upper]`
    pub fn above_at_most(lower: f64, upper: f64) -> Self {
        Self {
            above: Some(lower),
            at_most: Some(upper),
            ..Self::default()
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        self.above.map_or(true, |bound| value > bound)
            && self.at_least.map_or(true, |bound| value >= bound)
            && self.below.map_or(true, |bound| value < bound)
            && self.at_most.map_or(true, |bound| value <= bound)
    }

    /// Whether any value can fall inside the band. `(5, 2)` and `(3, 3]` are
    /// empty; `[3, 3]` holds exactly 3.
    pub fn is_satisfiable(&self) -> bool {
        let lower = tighter_bound(self.above, self.at_least, |a, b| a > b);
        let upper = tighter_bound(self.below, self.at_most, |a, b| a < b);
        match (lower, upper) {
            (Some((low, low_strict)), Some((high, high_strict))) => {
                low < high || (low == high && !low_strict && !high_strict)
            }
            _ => true,
        }
    }
}

/// The tighter of a strict and an inclusive bound as `(value, strict)`.
/// On a tie the strict bound wins.
fn tighter_bound(
    strict: Option<f64>,
    inclusive: Option<f64>,
    is_tighter: fn(f64, f64) -> bool,
) -> Option<(f64, bool)> {
    match (strict, inclusive) {
        (Some(s), Some(i)) if is_tighter(i, s) => Some((i, false)),
        (Some(s), _) => Some((s, true)),
        (None, Some(i)) => Some((i, false)),
        (None, None) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdRelation {
    LineAboveSignal,
    LineBelowSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionalComparison {
    PlusDiAbove,
    MinusDiAbove,
}

/// Conjunction of optional guards. An unset guard always passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConditions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<QualityTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_change: Option<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdRelation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directional: Option<DirectionalComparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_adx: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionRule {
    pub label: String,
    #[serde(default)]
    pub when: RuleConditions,
    /// Whether a match reports the profit target alongside the label.
    #[serde(default = "default_emit_target")]
    pub emit_target: bool,
}

fn default_emit_target() -> bool {
    true
}

impl PredictionRule {
    pub fn new(label: impl Into<String>, when: RuleConditions) -> Self {
        Self {
            label: label.into(),
            when,
            emit_target: true,
        }
    }

    pub fn without_target(mut self) -> Self {
        self.emit_target = false;
        self
    }
}

/// Below `min_adx` no directional call is made; `label` is emitted instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrendGate {
    pub min_adx: f64,
    #[serde(default = "default_gate_label")]
    pub label: String,
}

fn default_gate_label() -> String {
    "No Strong Trend".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionTable {
    pub rules: Vec<PredictionRule>,
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_gate: Option<TrendGate>,
}

fn default_fallback_label() -> String {
    "Placeholder".to_string()
}

impl Default for PredictionTable {
    /// The hourly futures scanner cascade, top to bottom.
    fn default() -> Self {
        let tier = |tier: QualityTier| vec![tier];
        Self {
            rules: vec![
                PredictionRule::new(
                    "Strong Long (>5%)",
                    RuleConditions {
                        tiers: tier(QualityTier::Cr4),
                        percentage_change: Some(Band::above(5.0)),
                        rsi: Some(Band::below(30.0)),
                        ..RuleConditions::default()
                    },
                ),
                PredictionRule::new(
                    "Moderate Long (2% - 5%)",
                    RuleConditions {
                        tiers: tier(QualityTier::Cr3),
                        percentage_change: Some(Band::above_at_most(2.0, 5.0)),
                        macd: Some(MacdRelation::LineAboveSignal),
                        ..RuleConditions::default()
                    },
                ),
                PredictionRule::new(
                    "Weak Long (0% - 2%)",
                    RuleConditions {
                        tiers: tier(QualityTier::Cr2),
                        percentage_change: Some(Band::above_at_most(0.0, 2.0)),
                        ..RuleConditions::default()
                    },
                ),
                PredictionRule::new(
                    "Hold",
                    RuleConditions {
                        tiers: tier(QualityTier::Cr1),
                        ..RuleConditions::default()
                    },
                )
                .without_target(),
                PredictionRule::new(
                    "Strong Short (>5%)",
                    RuleConditions {
                        tiers: tier(QualityTier::Cr4),
                        percentage_change: Some(Band::above(5.0)),
                        rsi: Some(Band::above(70.0)),
                        ..RuleConditions::default()
                    },
                ),
                PredictionRule::new(
                    "Moderate Short (2% - 5%)",
                    RuleConditions {
                        tiers: tier(QualityTier::Cr3),
                        percentage_change: Some(Band::above_at_most(2.0, 5.0)),
                        macd: Some(MacdRelation::LineBelowSignal),
                        ..RuleConditions::default()
                    },
                ),
                PredictionRule::new(
                    "Weak Short (0% - 2%)",
                    RuleConditions {
                        tiers: tier(QualityTier::Cr2),
                        percentage_change: Some(Band::above_at_most(0.0, 2.0)),
                        ..RuleConditions::default()
                    },
                ),
            ],
            fallback_label: default_fallback_label(),
            trend_gate: None,
        }
    }
}
