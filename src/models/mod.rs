//! Shared data models spanning the engine layers.

pub mod evaluation;
pub mod indicators;
pub mod rules;

pub use evaluation::{
    Evaluation, PredictionStatus, QualityTier, RiskLevels, Score, StopRegime, TradeDirection,
};
pub use indicators::{
    AdxIndicator, AtrIndicator, Candle, EmaIndicator, IndicatorSet, MacdIndicator,
    PositioningSample, RsiIndicator,
};
pub use rules::{
    Band, DirectionalComparison, MacdRelation, PredictionRule, PredictionTable, RuleConditions,
    TrendGate,
};
