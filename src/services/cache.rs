//! In-memory kline cache in front of another source.

use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use crate::services::market_data::KlineSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

type CacheKey = (String, String, usize);

struct CacheEntry {
    candles: Vec<Candle>,
    stored_at: Instant,
}

/// Caches non-empty responses per `(symbol, timeframe, limit)`.
///
/// Without a TTL an entry lives until [`CachedKlineSource::invalidate`] or
/// [`CachedKlineSource::clear`] is called.
pub struct CachedKlineSource<S> {
    inner: S,
    ttl: Option<Duration>,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl<S: KlineSource> CachedKlineSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            ttl: None,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn invalidate(&self, symbol: &str, timeframe: &str) {
        self.entries
            .write()
            .await
            .retain(|(s, t, _), _| s != symbol || t != timeframe);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.ttl.map_or(true, |ttl| entry.stored_at.elapsed() < ttl)
    }
}

#[async_trait]
impl<S: KlineSource> KlineSource for CachedKlineSource<S> {
    async fn get_klines(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let key = (symbol.to_string(), timeframe.to_string(), limit);

        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key).filter(|e| self.is_fresh(e)) {
                debug!(symbol, timeframe, count = entry.candles.len(), "kline cache hit");
                return Ok(entry.candles.clone());
            }
        }

        let candles = self.inner.get_klines(symbol, timeframe, limit).await?;
        if !candles.is_empty() {
            debug!(symbol, timeframe, count = candles.len(), "kline cache store");
            self.entries.write().await.insert(
                key,
                CacheEntry {
                    candles: candles.clone(),
                    stored_at: Instant::now(),
                },
            );
        }
        Ok(candles)
    }
}
