//! Per-tier aggregation of a scan's evaluations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::evaluation::{Evaluation, QualityTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    pub tier: QualityTier,
    pub count: usize,
    pub mean_rsi: f64,
    pub mean_rating: f64,
    pub mean_score: f64,
    /// Evaluations per prediction status label.
    pub status_counts: BTreeMap<String, usize>,
}

/// Group evaluations by tier, highest tier first. Tiers with no evaluation
/// are omitted.
pub fn summarize_by_tier(evaluations: &[Evaluation]) -> Vec<TierSummary> {
    QualityTier::ALL
        .iter()
        .filter_map(|tier| {
            let members: Vec<&Evaluation> = evaluations
                .iter()
                .filter(|evaluation| evaluation.quality == *tier)
                .collect();
            if members.is_empty() {
                return None;
            }

            let count = members.len();
            let mean = |value: fn(&Evaluation) -> f64| {
                members.iter().map(|evaluation| value(evaluation)).sum::<f64>() / count as f64
            };

            let mut status_counts = BTreeMap::new();
            for evaluation in &members {
                *status_counts
                    .entry(evaluation.prediction.label.clone())
                    .or_insert(0) += 1;
            }

            Some(TierSummary {
                tier: *tier,
                count,
                mean_rsi: mean(|e| e.indicators.rsi.value),
                mean_rating: mean(|e| e.score.rating),
                mean_score: mean(|e| e.score.composite),
                status_counts,
            })
        })
        .collect()
}
