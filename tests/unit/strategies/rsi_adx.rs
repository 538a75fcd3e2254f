//! Unit tests for the RSI+ADX strategy

use crate::common::{flat_then_spike, trending_candles, FailingSource};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};
use voltrix::models::indicators::Candle;
use voltrix::services::market_data::StaticKlineSource;
use voltrix::strategies::rsi_adx::{decide, MIN_CLOSES};
use voltrix::strategies::{OrderSizing, RsiAdxStrategy, SignalStrategy};
use voltrix::signals::thresholds::AdaptiveThresholds;
use voltrix::{Signal, SignalError, SignalRequest};

fn strategy_with(candles: Vec<Candle>) -> RsiAdxStrategy {
    let source = StaticKlineSource::new().with_series("BTCUSDT", "1h", candles);
    RsiAdxStrategy::new(Arc::new(source))
}

fn request(volatility: f64) -> SignalRequest {
    SignalRequest::new("BTCUSDT", "1h", 100).with_volatility(volatility)
}

#[test]
fn test_decide_requires_both_conditions() {
    let t = AdaptiveThresholds::from_volatility(0.2);
    assert_eq!(decide(80.0, 40.0, &t), Signal::Sell);
    assert_eq!(decide(20.0, 40.0, &t), Signal::Buy);
    assert_eq!(decide(80.0, 10.0, &t), Signal::Hold);
    assert_eq!(decide(20.0, 10.0, &t), Signal::Hold);
    assert_eq!(decide(50.0, 40.0, &t), Signal::Hold);
    // bounds are strict
    assert_eq!(decide(t.overbought, 40.0, &t), Signal::Hold);
    assert_eq!(decide(80.0, t.adx_threshold, &t), Signal::Hold);
}

#[test]
fn test_order_sizing_veto_boundary() {
    let sizing = OrderSizing::default();
    assert!((sizing.quantity(50.0) - 0.002).abs() < 1e-15);
    assert!(!sizing.is_below_minimum(50.0));
    assert!(!sizing.is_below_minimum(100.0));
    assert!(sizing.is_below_minimum(130.0));
}

#[test]
fn test_evaluate_uptrend_sells() {
    let strategy = strategy_with(Vec::new());
    let eval = strategy.evaluate(&trending_candles(30, 20.0, 0.5), 0.2).unwrap();
    assert_eq!(eval.rsi.value, 100.0);
    assert_eq!(eval.rsi.period, 11);
    assert_eq!(eval.adx.period, 14);
    assert!(eval.adx.value > eval.thresholds.adx_threshold);
    assert_eq!(eval.indicator_signal, Signal::Sell);
    assert_eq!(eval.signal, Signal::Sell);
    assert!(!eval.vetoed());
}

#[test]
fn test_evaluate_downtrend_buys() {
    let strategy = strategy_with(Vec::new());
    let eval = strategy.evaluate(&trending_candles(30, 50.0, -0.5), 0.2).unwrap();
    assert_eq!(eval.rsi.value, 0.0);
    assert_eq!(eval.signal, Signal::Buy);
}

#[test]
fn test_evaluate_vetoes_small_orders() {
    let strategy = strategy_with(Vec::new());
    let eval = strategy.evaluate(&trending_candles(30, 200.0, 0.5), 0.2).unwrap();
    assert_eq!(eval.indicator_signal, Signal::Sell);
    assert_eq!(eval.signal, Signal::Hold);
    assert!(eval.vetoed());
    assert!(eval.quantity.unwrap() < 0.001);
}

#[test]
fn test_custom_sizing_lifts_veto() {
    let strategy = strategy_with(Vec::new()).with_sizing(OrderSizing {
        nominal_balance: 100.0,
        ..OrderSizing::default()
    });
    let eval = strategy.evaluate(&trending_candles(30, 200.0, 0.5), 0.2).unwrap();
    assert_eq!(eval.signal, Signal::Sell);
}

#[test]
fn test_adx_period_ignores_volatility() {
    let strategy = strategy_with(Vec::new());
    let candles = trending_candles(40, 20.0, 0.5);
    let calm = strategy.evaluate(&candles, 0.0).unwrap();
    let wild = strategy.evaluate(&candles, 0.9).unwrap();
    assert_ne!(calm.rsi.period, wild.rsi.period);
    assert_eq!(calm.adx.period, 14);
    assert_eq!(wild.adx.period, 14);
    assert_eq!(calm.adx.value, wild.adx.value);
}

#[test]
fn test_evaluate_requires_base_window() {
    let strategy = strategy_with(Vec::new());
    assert!(strategy.evaluate(&trending_candles(MIN_CLOSES - 1, 20.0, 0.5), 0.9).is_none());
    assert!(strategy.evaluate(&trending_candles(MIN_CLOSES, 20.0, 0.5), 0.9).is_some());
}

#[tokio::test]
async fn test_generate_signal_requires_volatility() {
    let strategy = strategy_with(trending_candles(30, 20.0, 0.5));
    let result = strategy
        .generate_signal(&SignalRequest::new("BTCUSDT", "1h", 100))
        .await;
    let err = assert_err!(result);
    assert!(matches!(err, SignalError::MissingVolatility { strategy: "rsi_adx", .. }));
}

#[tokio::test]
async fn test_insufficient_data_holds_before_volatility_check() {
    let no_volatility = SignalRequest::new("BTCUSDT", "1h", 30);

    let strategy = strategy_with(Vec::new());
    assert_eq!(assert_ok!(strategy.generate_signal(&no_volatility).await), Signal::Hold);

    let strategy = strategy_with(trending_candles(MIN_CLOSES - 1, 20.0, 0.5));
    assert_eq!(assert_ok!(strategy.generate_signal(&no_volatility).await), Signal::Hold);

    let strategy = RsiAdxStrategy::new(Arc::new(FailingSource));
    assert_eq!(assert_ok!(strategy.generate_signal(&no_volatility).await), Signal::Hold);

    let strategy = strategy_with(trending_candles(30, 20.0, 0.5));
    let err = assert_err!(strategy.generate_signal(&no_volatility).await);
    assert!(matches!(err, SignalError::MissingVolatility { strategy: "rsi_adx", .. }));
}

#[tokio::test]
async fn test_generate_signal_holds_without_data() {
    let strategy = strategy_with(Vec::new());
    assert_eq!(assert_ok!(strategy.generate_signal(&request(0.2)).await), Signal::Hold);

    let strategy = strategy_with(trending_candles(14, 20.0, 0.5));
    assert_eq!(assert_ok!(strategy.generate_signal(&request(0.2)).await), Signal::Hold);
}

#[tokio::test]
async fn test_generate_signal_holds_on_fetch_failure() {
    let strategy = RsiAdxStrategy::new(Arc::new(FailingSource));
    assert_eq!(assert_ok!(strategy.generate_signal(&request(0.2)).await), Signal::Hold);
}

#[tokio::test]
async fn test_generate_signal_is_idempotent() {
    let strategy = strategy_with(trending_candles(30, 20.0, 0.5));
    let first = strategy.generate_signal(&request(0.2)).await.unwrap();
    let second = strategy.generate_signal(&request(0.2)).await.unwrap();
    assert_eq!(first, Signal::Sell);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_flat_then_spike_scenario() {
    let candles = flat_then_spike();
    let strategy = strategy_with(candles.clone());
    let eval = strategy.evaluate(&candles, 0.2).unwrap();

    // the seed window holds no moves at all, so RSI stays neutral
    assert_eq!(eval.rsi.period, 11);
    assert_eq!(eval.rsi.value, 50.0);
    assert!((eval.adx.value - 12.5).abs() < 1e-9);

    let overbought = eval.rsi.value > eval.thresholds.overbought;
    let trending = eval.adx.value > eval.thresholds.adx_threshold;
    assert!(!overbought);
    assert!(!trending);
    assert_eq!(eval.indicator_signal, Signal::Hold);

    let signal = strategy.generate_signal(&request(0.2)).await.unwrap();
    assert_ne!(signal, Signal::Sell);
    assert_eq!(signal, Signal::Hold);
}
