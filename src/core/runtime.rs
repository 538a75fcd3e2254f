//! Runtime wiring: configuration, kline source and strategy construction.

use crate::config::{env_or, get_mexc_base_url, parse_list};
use crate::error::{ConfigError, MarketDataError};
use crate::metrics::Metrics;
use crate::services::cache::CachedKlineSource;
use crate::services::market_data::KlineSource;
use crate::services::mexc::MexcKlineSource;
use crate::services::volatility::{MarketStateVolatility, VolatilityProvider};
use crate::signals::engine::{SignalEngine, SymbolSignal};
use crate::strategies::{MeanReversionStrategy, RsiAdxStrategy, SignalStrategy, StrategyKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Configuration for the signal runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub evaluation_interval_seconds: u64,
    pub symbols: Vec<String>,
    pub timeframe: String,
    pub limit: usize,
    pub strategy: StrategyKind,
    /// Volatility applied to every symbol without its own estimate.
    pub volatility: f64,
    /// Kline cache lifetime; `0` disables the cache.
    pub cache_ttl_seconds: u64,
    pub mexc_base_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_seconds: 60,
            symbols: vec!["BTCUSDT".to_string()],
            timeframe: "1h".to_string(),
            limit: 30,
            strategy: StrategyKind::RsiAdx,
            volatility: 0.3,
            cache_ttl_seconds: 0,
            mexc_base_url: crate::config::DEFAULT_MEXC_BASE_URL.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Read the configuration from the environment, keeping defaults for
    /// unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let symbols = match std::env::var("SYMBOLS") {
            Ok(raw) => parse_list(&raw),
            Err(_) => defaults.symbols,
        };

        Ok(Self {
            evaluation_interval_seconds: env_or(
                "EVAL_INTERVAL_SECONDS",
                defaults.evaluation_interval_seconds,
            )?,
            symbols,
            timeframe: env_or("TIMEFRAME", defaults.timeframe)?,
            limit: env_or("KLINE_LIMIT", defaults.limit)?,
            strategy: env_or("STRATEGY", defaults.strategy)?,
            volatility: env_or("VOLATILITY", defaults.volatility)?,
            cache_ttl_seconds: env_or("KLINE_CACHE_TTL_SECONDS", defaults.cache_ttl_seconds)?,
            mexc_base_url: get_mexc_base_url(),
        })
    }
}

/// Owns the configured engine and evaluates the configured symbols.
pub struct SignalRuntime {
    config: RuntimeConfig,
    engine: Arc<SignalEngine>,
}

impl SignalRuntime {
    /// Build a runtime around an existing kline source.
    pub fn new(config: RuntimeConfig, source: Arc<dyn KlineSource>, metrics: Option<Arc<Metrics>>) -> Self {
        let volatility: Arc<dyn VolatilityProvider> =
            Arc::new(MarketStateVolatility::new(Some(config.volatility)));
        let strategy = build_strategy(config.strategy, source, volatility.clone());

        let mut engine = SignalEngine::new(strategy, volatility, config.timeframe.as_str(), config.limit);
        if let Some(metrics) = metrics {
            engine = engine.with_metrics(metrics);
        }

        info!(
            strategy = %config.strategy,
            symbols = ?config.symbols,
            timeframe = %config.timeframe,
            limit = config.limit,
            "SignalRuntime: configured"
        );

        Self {
            config,
            engine: Arc::new(engine),
        }
    }

    /// Build a runtime backed by the MEXC REST source described in `config`.
    pub fn from_config(config: RuntimeConfig, metrics: Option<Arc<Metrics>>) -> Result<Self, MarketDataError> {
        let source = build_kline_source(&config)?;
        Ok(Self::new(config, source, metrics))
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn engine(&self) -> Arc<SignalEngine> {
        self.engine.clone()
    }

    /// Evaluate all configured symbols once.
    pub async fn run_once(&self) -> Vec<SymbolSignal> {
        self.engine.evaluate_batch(&self.config.symbols).await
    }
}

pub fn build_strategy(
    kind: StrategyKind,
    source: Arc<dyn KlineSource>,
    volatility: Arc<dyn VolatilityProvider>,
) -> Arc<dyn SignalStrategy> {
    match kind {
        StrategyKind::RsiAdx => Arc::new(RsiAdxStrategy::new(source)),
        StrategyKind::MeanReversion => Arc::new(MeanReversionStrategy::new(source, volatility)),
    }
}

pub fn build_kline_source(config: &RuntimeConfig) -> Result<Arc<dyn KlineSource>, MarketDataError> {
    let mexc = MexcKlineSource::new(config.mexc_base_url.as_str())?;
    if config.cache_ttl_seconds == 0 {
        return Ok(Arc::new(mexc));
    }
    Ok(Arc::new(
        CachedKlineSource::new(mexc).with_ttl(Duration::from_secs(config.cache_ttl_seconds)),
    ))
}
