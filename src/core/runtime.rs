//! One-shot scan over every instrument a market data source offers

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{EvaluationError, MarketDataError};
use crate::metrics::Metrics;
use crate::models::evaluation::Evaluation;
use crate::services::binance::DEFAULT_BASE_URL;
use crate::services::market_data::MarketDataSource;
use crate::signals::engine::SignalEngine;

/// Process-level settings for a scan, separate from the engine [`Config`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Explicit instrument list; empty means ask the source.
    pub symbols: Vec<String>,
    pub concurrency: usize,
    pub report_dir: PathBuf,
    pub base_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            concurrency: 8,
            report_dir: PathBuf::from("reports"),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Read `SCAN_SYMBOLS`, `SCAN_CONCURRENCY`, `REPORT_DIR` and
    /// `BINANCE_FUTURES_URL`, keeping defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let symbols = env::var("SCAN_SYMBOLS")
            .map(|value| parse_symbols(&value))
            .unwrap_or_default();
        let concurrency = env::var("SCAN_CONCURRENCY")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.concurrency);
        let report_dir = env::var("REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.report_dir);
        let base_url = env::var("BINANCE_FUTURES_URL").unwrap_or(defaults.base_url);

        Self {
            symbols,
            concurrency,
            report_dir,
            base_url,
        }
    }
}

/// Comma separated, trimmed, upper-cased, empties dropped.
pub fn parse_symbols(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|symbol| symbol.trim().to_uppercase())
        .filter(|symbol| !symbol.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    NotFound,
    InsufficientData,
    MalformedInput,
    Indicator,
    MarketData,
}

impl SkipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InsufficientData => "insufficient_data",
            Self::MalformedInput => "malformed_input",
            Self::Indicator => "indicator",
            Self::MarketData => "market_data",
        }
    }
}

impl From<&EvaluationError> for SkipKind {
    fn from(error: &EvaluationError) -> Self {
        match error {
            EvaluationError::InsufficientData { .. } | EvaluationError::MissingPositioning => {
                Self::InsufficientData
            }
            EvaluationError::MalformedInput { .. } => Self::MalformedInput,
            EvaluationError::Indicator(_) => Self::Indicator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInstrument {
    pub instrument: String,
    pub kind: SkipKind,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Sorted by instrument id.
    pub evaluations: Vec<Evaluation>,
    /// Sorted by instrument id.
    pub skipped: Vec<SkippedInstrument>,
}

impl ScanReport {
    pub fn skipped_by(&self, kind: SkipKind) -> usize {
        self.skipped.iter().filter(|skip| skip.kind == kind).count()
    }
}

pub struct ScanRuntime {
    source: Arc<dyn MarketDataSource>,
    config: Arc<Config>,
    symbols: Vec<String>,
    concurrency: usize,
    metrics: Option<Arc<Metrics>>,
}

impl ScanRuntime {
    pub fn new(source: Arc<dyn MarketDataSource>, config: Config) -> Self {
        Self {
            source,
            config: Arc::new(config),
            symbols: Vec::new(),
            concurrency: RuntimeConfig::default().concurrency,
            metrics: None,
        }
    }

    /// Restrict the scan to these instruments instead of listing the source.
    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fetch and evaluate every instrument once.
    ///
    /// Per-instrument failures become [`SkippedInstrument`] entries; only a
    /// failure to list instruments aborts the scan.
    pub async fn run_once(&self) -> Result<ScanReport, MarketDataError> {
        let instruments = if self.symbols.is_empty() {
            self.source.list_instruments().await?
        } else {
            self.symbols.clone()
        };
        let limit = self.config.window_length.max(self.config.required_candles());

        info!(
            instruments = instruments.len(),
            concurrency = self.concurrency,
            interval = %self.config.interval,
            limit,
            "scan started"
        );

        let outcomes: Vec<(String, Result<Evaluation, SkippedInstrument>)> =
            stream::iter(instruments)
                .map(|instrument| async move {
                    let outcome = self.scan_instrument(&instrument, limit).await;
                    (instrument, outcome)
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        let mut report = ScanReport::default();
        for (instrument, outcome) in outcomes {
            match outcome {
                Ok(evaluation) => {
                    if let Some(metrics) = &self.metrics {
                        metrics.evaluations_total.inc();
                        metrics
                            .evaluations_by_tier
                            .with_label_values(&[evaluation.quality.as_str()])
                            .inc();
                    }
                    report.evaluations.push(evaluation);
                }
                Err(skip) => {
                    debug!(instrument = %instrument, kind = skip.kind.as_str(), reason = %skip.reason, "instrument skipped");
                    if let Some(metrics) = &self.metrics {
                        metrics
                            .instruments_skipped_total
                            .with_label_values(&[skip.kind.as_str()])
                            .inc();
                    }
                    report.skipped.push(skip);
                }
            }
        }

        report
            .evaluations
            .sort_by(|a, b| a.instrument.cmp(&b.instrument));
        report.skipped.sort_by(|a, b| a.instrument.cmp(&b.instrument));

        if let Some(metrics) = &self.metrics {
            metrics.scans_total.inc();
        }

        info!(
            evaluated = report.evaluations.len(),
            skipped = report.skipped.len(),
            "scan finished"
        );
        Ok(report)
    }

    async fn scan_instrument(
        &self,
        instrument: &str,
        limit: usize,
    ) -> Result<Evaluation, SkippedInstrument> {
        let started = Instant::now();
        if let Some(metrics) = &self.metrics {
            metrics.evaluations_in_flight.inc();
        }

        let outcome = self.fetch_and_evaluate(instrument, limit).await;

        if let Some(metrics) = &self.metrics {
            metrics.evaluations_in_flight.dec();
            metrics
                .evaluation_duration_seconds
                .observe(started.elapsed().as_secs_f64());
        }
        outcome
    }

    async fn fetch_and_evaluate(
        &self,
        instrument: &str,
        limit: usize,
    ) -> Result<Evaluation, SkippedInstrument> {
        let skip = |kind: SkipKind, reason: String| SkippedInstrument {
            instrument: instrument.to_string(),
            kind,
            reason,
        };

        let snapshot = match self
            .source
            .fetch_snapshot(instrument, &self.config.interval, limit)
            .await
        {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Err(skip(SkipKind::NotFound, "unknown instrument".to_string())),
            Err(e) => {
                warn!(instrument, error = %e, "market data fetch failed");
                return Err(skip(SkipKind::MarketData, e.to_string()));
            }
        };

        SignalEngine::evaluate(
            instrument,
            &snapshot.candles,
            snapshot.positioning.as_ref(),
            &self.config,
        )
        .map_err(|e| skip(SkipKind::from(&e), e.to_string()))
    }
}
