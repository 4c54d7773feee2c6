//! Thin REST client for the futures public endpoints.

use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::messages::{ExchangeInfo, KlineRow, LongShortRatioEntry};
use crate::error::MarketDataError;

pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";

const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
const KLINES_PATH: &str = "/fapi/v1/klines";
const LONG_SHORT_RATIO_PATH: &str = "/futures/data/globalLongShortAccountRatio";

pub struct BinanceRestClient {
    base_url: String,
    http: reqwest::Client,
    max_retries: usize,
}

impl BinanceRestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            max_retries: 3,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub async fn exchange_info(&self) -> Result<ExchangeInfo, MarketDataError> {
        self.get_json(EXCHANGE_INFO_PATH, &[]).await
    }

    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<KlineRow>, MarketDataError> {
        let query = [
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_json(KLINES_PATH, &query).await
    }

    pub async fn long_short_ratio(
        &self,
        symbol: &str,
        period: &str,
        limit: usize,
    ) -> Result<Vec<LongShortRatioEntry>, MarketDataError> {
        let query = [
            ("symbol", symbol.to_string()),
            ("period", period.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_json(LONG_SHORT_RATIO_PATH, &query).await
    }

    /// GET with exponential backoff on transport errors, 429 and 5xx.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", self.base_url, path);

        let fetch = || async {
            debug!(%url, ?query, "binance request");
            let response = self.http.get(&url).query(query).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(MarketDataError::Status {
                    endpoint: path.to_string(),
                    status: status.as_u16(),
                });
            }
            Ok(response.json::<T>().await?)
        };

        fetch
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(self.max_retries),
            )
            .when(|error| error.is_retryable())
            .notify(|error, delay| {
                warn!(endpoint = path, error = %error, ?delay, "binance request failed, retrying");
            })
            .await
    }
}
