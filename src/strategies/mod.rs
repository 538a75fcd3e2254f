//! Strategy definitions that turn a candle window into a signal.

pub mod mean_reversion;
pub mod rsi_adx;

pub use mean_reversion::{MeanReversionEvaluation, MeanReversionStrategy};
pub use rsi_adx::{OrderSizing, RsiAdxEvaluation, RsiAdxStrategy};

use crate::error::{ConfigError, SignalError};
use crate::models::signal::{Signal, SignalRequest};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// A signal-producing strategy.
///
/// `generate_signal` holds on missing or short data and only errors when the
/// request itself breaks the strategy's contract.
#[async_trait]
pub trait SignalStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate_signal(&self, request: &SignalRequest) -> Result<Signal, SignalError>;
}

/// Strategy selector used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    RsiAdx,
    MeanReversion,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::RsiAdx => rsi_adx::STRATEGY_NAME,
            StrategyKind::MeanReversion => mean_reversion::STRATEGY_NAME,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rsi_adx" | "rsi" => Ok(StrategyKind::RsiAdx),
            "mean_reversion" => Ok(StrategyKind::MeanReversion),
            _ => Err(ConfigError::Invalid {
                key: "STRATEGY",
                value: s.to_string(),
            }),
        }
    }
}
