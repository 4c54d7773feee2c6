//! CSV report: one table per quality tier plus a JSON tier summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::summary::summarize_by_tier;
use super::{ReportOutcome, ReportSink};
use crate::error::ReportError;
use crate::models::evaluation::{Evaluation, QualityTier};

/// Flat CSV projection of an [`Evaluation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRow<'a> {
    pub symbol: &'a str,
    pub interval: &'a str,
    pub timestamp: String,
    pub price: f64,
    pub rsi: f64,
    pub long_short_ratio: f64,
    pub rating: f64,
    pub quality: QualityTier,
    pub score: f64,
    pub prediction_status: &'a str,
    pub profit_target: Option<f64>,
    pub percentage_change: f64,
    pub stop_loss: f64,
    pub trailing_stop: Option<f64>,
    pub macd_line: f64,
    pub signal_line: f64,
    pub atr: f64,
    pub adx: f64,
}

impl<'a> From<&'a Evaluation> for EvaluationRow<'a> {
    fn from(evaluation: &'a Evaluation) -> Self {
        Self {
            symbol: &evaluation.instrument,
            interval: &evaluation.interval,
            timestamp: evaluation.timestamp.to_rfc3339(),
            price: evaluation.price,
            rsi: evaluation.indicators.rsi.value,
            long_short_ratio: evaluation.long_short_ratio,
            rating: evaluation.score.rating,
            quality: evaluation.quality,
            score: evaluation.score.composite,
            prediction_status: &evaluation.prediction.label,
            profit_target: evaluation.prediction.profit_target,
            percentage_change: evaluation.risk.percentage_change,
            stop_loss: evaluation.risk.stop_loss,
            trailing_stop: evaluation.risk.trailing_stop,
            macd_line: evaluation.indicators.macd.macd,
            signal_line: evaluation.indicators.macd.signal,
            atr: evaluation.indicators.atr.value,
            adx: evaluation.indicators.adx.value,
        }
    }
}

/// Writes `signals_<DDMMYYYY_HHMM>_<tier>.csv` for every tier present and a
/// `signals_<DDMMYYYY_HHMM>_summary.json` next to them.
pub struct CsvReportSink {
    output_dir: PathBuf,
    stamp: Option<DateTime<Utc>>,
}

impl CsvReportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stamp: None,
        }
    }

    /// Pin the file-name stamp instead of using the wall clock.
    pub fn with_stamp(mut self, stamp: DateTime<Utc>) -> Self {
        self.stamp = Some(stamp);
        self
    }

    fn file_prefix(&self) -> String {
        let stamp = self.stamp.unwrap_or_else(Utc::now);
        format!("signals_{}", stamp.format("%d%m%Y_%H%M"))
    }
}

impl ReportSink for CsvReportSink {
    fn write(&mut self, evaluations: &[Evaluation]) -> Result<ReportOutcome, ReportError> {
        fs::create_dir_all(&self.output_dir)?;
        let prefix = self.file_prefix();
        let mut files = Vec::new();

        for tier in QualityTier::ALL {
            let rows: Vec<EvaluationRow<'_>> = evaluations
                .iter()
                .filter(|evaluation| evaluation.quality == tier)
                .map(EvaluationRow::from)
                .collect();
            if rows.is_empty() {
                continue;
            }

            let path = self.output_dir.join(format!("{}_{}.csv", prefix, tier));
            let mut writer = csv::Writer::from_path(&path)?;
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;

            info!(tier = %tier, rows = rows.len(), path = %path.display(), "tier report written");
            files.push(path);
        }

        let summaries = summarize_by_tier(evaluations);
        let summary_path = self.output_dir.join(format!("{}_summary.json", prefix));
        fs::write(&summary_path, serde_json::to_string_pretty(&summaries)?)?;
        files.push(summary_path);

        Ok(ReportOutcome { files, summaries })
    }
}
