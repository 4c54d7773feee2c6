use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("{indicator}: needs {required} values, got {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },

    #[error("{indicator}: period must be greater than zero")]
    InvalidPeriod { indicator: &'static str },

    #[error("{indicator}: input series have different lengths")]
    LengthMismatch { indicator: &'static str },
}

impl IndicatorError {
    pub(crate) fn insufficient(indicator: &'static str, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            indicator,
            required,
            available,
        }
    }
}
