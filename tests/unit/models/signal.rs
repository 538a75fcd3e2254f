//! Unit tests for signal models

use voltrix::models::indicators::Candle;
use voltrix::{Signal, SignalRequest};

#[test]
fn test_signal_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Signal::Buy).unwrap(), "\"buy\"");
    assert_eq!(serde_json::to_string(&Signal::Hold).unwrap(), "\"hold\"");
    let parsed: Signal = serde_json::from_str("\"sell\"").unwrap();
    assert_eq!(parsed, Signal::Sell);
    assert!(serde_json::from_str::<Signal>("\"short\"").is_err());
}

#[test]
fn test_signal_from_str_is_closed() {
    for signal in [Signal::Buy, Signal::Sell, Signal::Hold] {
        assert_eq!(signal.to_string().parse::<Signal>().unwrap(), signal);
    }
    let err = "Buy".parse::<Signal>().unwrap_err();
    assert_eq!(err.to_string(), "unknown signal 'Buy'");
}

#[test]
fn test_signal_request_builder() {
    let request = SignalRequest::new("BTCUSDT", "1h", 30);
    assert_eq!(request.volatility, None);
    let request = request.with_volatility(0.4);
    assert_eq!(request.volatility, Some(0.4));
    assert_eq!(request.limit, 30);
}

#[test]
fn test_candle_timestamp_is_epoch_millis() {
    let candle = Candle::new(1.0, 2.0, 0.5, 1.5, 10.0, 1_700_000_000_000);
    let dt = candle.datetime().unwrap();
    assert_eq!(dt.timestamp_millis(), 1_700_000_000_000);

    let json = serde_json::to_value(candle).unwrap();
    assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    assert_eq!(json["close"], 1.5);
}
