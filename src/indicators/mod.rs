//! Technical indicators over closed candle windows.
//!
//! Every function is pure: it reads an oldest-to-newest series and returns a
//! value or an [`IndicatorError`], never holding state between calls.

pub mod error;
pub mod set;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use error::IndicatorError;
pub use momentum::{calculate_macd, calculate_rsi, MacdSignalMode, MAX_RSI_WITH_LOSS};
pub use set::compute_indicator_set;
pub use trend::{calculate_adx, calculate_ema, calculate_emas, AdxMode};
pub use volatility::calculate_atr;
