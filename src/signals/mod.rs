//! Signal evaluation: rating, scoring, classification and risk.

pub mod engine;
pub mod positioning;
pub mod prediction;
pub mod quality;
pub mod risk;
pub mod scoring;

pub use engine::SignalEngine;
pub use positioning::positioning_rating;
pub use prediction::{PredictionClassifier, PredictionInputs};
pub use quality::classify_quality;
pub use risk::{profit_target, ratchet_stop, regime_stop, select_regime, trailing_stop, RiskManager};
pub use scoring::{adjusted_weights, base_weights, composite_score};
