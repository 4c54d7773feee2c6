//! Scan output: tier summaries and report sinks.

pub mod csv_sink;
pub mod summary;

pub use csv_sink::{CsvReportSink, EvaluationRow};
pub use summary::{summarize_by_tier, TierSummary};

use std::path::PathBuf;

use crate::error::ReportError;
use crate::models::evaluation::Evaluation;

/// What a sink produced for one scan.
#[derive(Debug, Clone, Default)]
pub struct ReportOutcome {
    pub files: Vec<PathBuf>,
    pub summaries: Vec<TierSummary>,
}

pub trait ReportSink {
    fn write(&mut self, evaluations: &[Evaluation]) -> Result<ReportOutcome, ReportError>;
}
