//! Unit tests for signal runtime

use crate::common::trending_candles;
use std::sync::Arc;
use voltrix::core::runtime::{build_strategy, RuntimeConfig, SignalRuntime};
use voltrix::services::market_data::StaticKlineSource;
use voltrix::services::volatility::FixedVolatility;
use voltrix::strategies::StrategyKind;
use voltrix::Signal;

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.evaluation_interval_seconds, 60);
    assert_eq!(config.symbols, vec!["BTCUSDT".to_string()]);
    assert_eq!(config.timeframe, "1h");
    assert_eq!(config.limit, 30);
    assert_eq!(config.strategy, StrategyKind::RsiAdx);
    assert_eq!(config.cache_ttl_seconds, 0);
}

#[test]
fn test_strategy_kind_parsing() {
    assert_eq!("rsi_adx".parse::<StrategyKind>().unwrap(), StrategyKind::RsiAdx);
    assert_eq!(
        " Mean_Reversion ".parse::<StrategyKind>().unwrap(),
        StrategyKind::MeanReversion
    );
    assert!("momentum".parse::<StrategyKind>().is_err());
    assert_eq!(StrategyKind::MeanReversion.to_string(), "mean_reversion");
}

#[test]
fn test_build_strategy_names() {
    let source = Arc::new(StaticKlineSource::new());
    let volatility = Arc::new(FixedVolatility(0.1));
    let rsi = build_strategy(StrategyKind::RsiAdx, source.clone(), volatility.clone());
    let mr = build_strategy(StrategyKind::MeanReversion, source, volatility);
    assert_eq!(rsi.name(), "rsi_adx");
    assert_eq!(mr.name(), "mean_reversion");
}

#[tokio::test]
async fn test_runtime_run_once() {
    let source = Arc::new(
        StaticKlineSource::new()
            .with_series("BTCUSDT", "1h", trending_candles(30, 20.0, 0.5))
            .with_series("ETHUSDT", "1h", trending_candles(30, 50.0, -0.5)),
    );
    let config = RuntimeConfig {
        symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
        volatility: 0.2,
        ..RuntimeConfig::default()
    };
    let runtime = SignalRuntime::new(config, source, None);

    let outcomes = runtime.run_once().await;
    let signals: Vec<Signal> = outcomes.into_iter().map(|o| o.result.unwrap()).collect();
    assert_eq!(signals, vec![Signal::Sell, Signal::Buy]);
}
