//! Kline source interface.

use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use async_trait::async_trait;
use std::collections::HashMap;

/// Supplies an ordered window of candles for a symbol and timeframe.
///
/// Implementations return at most `limit` candles, oldest first. Strategies
/// treat an error or an empty window as "no data" and hold.
#[async_trait]
pub trait KlineSource: Send + Sync {
    async fn get_klines(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

/// In-memory source keyed by `(symbol, timeframe)`.
#[derive(Debug, Clone, Default)]
pub struct StaticKlineSource {
    series: HashMap<(String, String), Vec<Candle>>,
}

impl StaticKlineSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(
        mut self,
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        candles: Vec<Candle>,
    ) -> Self {
        self.insert(symbol, timeframe, candles);
        self
    }

    pub fn insert(
        &mut self,
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        candles: Vec<Candle>,
    ) {
        self.series.insert((symbol.into(), timeframe.into()), candles);
    }
}

#[async_trait]
impl KlineSource for StaticKlineSource {
    async fn get_klines(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let key = (symbol.to_string(), timeframe.to_string());
        Ok(self
            .series
            .get(&key)
            .map(|candles| candles[candles.len().saturating_sub(limit)..].to_vec())
            .unwrap_or_default())
    }
}
