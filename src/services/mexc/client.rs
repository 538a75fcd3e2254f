//! REST kline source for the MEXC spot API.

use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use crate::services::market_data::KlineSource;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: usize = 3;

/// `GET /api/v3/klines`, retried with exponential backoff on transport
/// errors and 5xx responses.
#[derive(Clone)]
pub struct MexcKlineSource {
    base_url: String,
    client: reqwest::Client,
    backoff: ExponentialBuilder,
}

impl MexcKlineSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            backoff: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(200))
                .with_max_times(DEFAULT_MAX_RETRIES),
        }
    }

    /// Override the retry budget (0 disables retries).
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.backoff = self.backoff.with_max_times(max_retries);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_once(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("interval", timeframe), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        parse_klines(&body)
    }
}

fn is_retryable(error: &MarketDataError) -> bool {
    match error {
        MarketDataError::Http(_) => true,
        MarketDataError::Api { status, .. } => *status >= 500,
        MarketDataError::Malformed(_) => false,
    }
}

#[async_trait]
impl KlineSource for MexcKlineSource {
    #[instrument(skip(self), name = "mexc::get_klines")]
    async fn get_klines(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let candles = (|| self.fetch_once(symbol, timeframe, limit))
            .retry(self.backoff.clone())
            .when(is_retryable)
            .notify(|error: &MarketDataError, delay: Duration| {
                warn!(symbol, error = %error, delay_ms = delay.as_millis() as u64, "retrying kline fetch");
            })
            .await?;

        debug!(symbol, timeframe, count = candles.len(), "klines fetched");
        Ok(candles)
    }
}

/// Parse the array-of-arrays kline payload.
///
/// Layout: `[openTime, open, high, low, close, volume, closeTime, ...]`.
/// Prices may be encoded as JSON strings or numbers. Rows with fewer than six
/// fields are skipped.
pub fn parse_klines(body: &Value) -> Result<Vec<Candle>, MarketDataError> {
    let rows = body
        .as_array()
        .ok_or_else(|| MarketDataError::Malformed("klines response is not an array".into()))?;

    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        let fields = row
            .as_array()
            .ok_or_else(|| MarketDataError::Malformed("kline entry is not an array".into()))?;

        if fields.len() < 6 {
            warn!(len = fields.len(), "skipping malformed kline entry");
            continue;
        }

        let timestamp = number(&fields[0])? as i64;
        candles.push(Candle::new(
            number(&fields[1])?,
            number(&fields[2])?,
            number(&fields[3])?,
            number(&fields[4])?,
            number(&fields[5])?,
            timestamp,
        ));
    }
    Ok(candles)
}

fn number(value: &Value) -> Result<f64, MarketDataError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MarketDataError::Malformed(format!("non-finite number {n}"))),
        Value::String(s) => s
            .parse()
            .map_err(|_| MarketDataError::Malformed(format!("invalid numeric field '{s}'"))),
        other => Err(MarketDataError::Malformed(format!("unexpected field {other}"))),
    }
}
