//! Voltrix: volatility-adaptive technical signal engine.
//!
//! Candles come in through a [`services::market_data::KlineSource`], indicators
//! are computed as pure functions over the window, and each strategy turns the
//! result into a [`models::signal::Signal`].

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;

pub use error::{ConfigError, MarketDataError, SignalError};
pub use models::indicators::Candle;
pub use models::signal::{Signal, SignalRequest};
