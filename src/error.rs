//! Error types shared across the engine.

use thiserror::Error;

/// Failures surfaced by a signal request.
///
/// Data shortages and fetch failures are not errors: strategies fall back to
/// [`crate::Signal::Hold`] for those.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("strategy '{strategy}' requires a volatility estimate for {symbol}")]
    MissingVolatility {
        strategy: &'static str,
        symbol: String,
    },
}

/// Failures from a kline source.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("exchange returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed kline payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}
