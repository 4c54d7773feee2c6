//! Binance USDⓈ-M futures REST payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
}

impl SymbolInfo {
    /// Live perpetual contracts. Missing fields are treated as tradable.
    pub fn is_tradable_perpetual(&self) -> bool {
        self.status.as_deref().map_or(true, |status| status == "TRADING")
            && self
                .contract_type
                .as_deref()
                .map_or(true, |kind| kind == "PERPETUAL")
    }
}

/// One entry of `globalLongShortAccountRatio`. Decimals arrive as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongShortRatioEntry {
    pub symbol: String,
    pub long_short_ratio: String,
    pub long_account: String,
    pub short_account: String,
    pub timestamp: i64,
}

/// Kline rows are positional arrays:
/// `[openTime, open, high, low, close, volume, closeTime, ...]`.
pub type KlineRow = Vec<serde_json::Value>;
