//! Error types shared across the engine, data sources and report sinks.

use thiserror::Error;

pub use crate::indicators::error::IndicatorError;

/// Reasons a single instrument produces no [`Evaluation`](crate::models::Evaluation).
///
/// None of these abort a scan: the runtime records the skip and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("insufficient data: {available} candles, {required} required")]
    InsufficientData { required: usize, available: usize },

    #[error("no positioning sample available")]
    MissingPositioning,

    #[error("malformed {field}: {reason}")]
    MalformedInput { field: String, reason: String },

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

impl EvaluationError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed payload from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl MarketDataError {
    /// Timeouts, connection failures, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout() || error.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Malformed { .. } => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
