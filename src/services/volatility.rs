//! Volatility estimate providers.

use async_trait::async_trait;
use std::collections::HashMap;

/// Supplies the volatility scalar for a symbol, nominally in `[0, 1]`.
///
/// Values are passed to the threshold formulas as-is; `None` means no
/// estimate is available.
#[async_trait]
pub trait VolatilityProvider: Send + Sync {
    async fn get_volatility(&self, symbol: &str) -> Option<f64>;
}

/// Same estimate for every symbol.
#[derive(Debug, Clone, Copy)]
pub struct FixedVolatility(pub f64);

#[async_trait]
impl VolatilityProvider for FixedVolatility {
    async fn get_volatility(&self, _symbol: &str) -> Option<f64> {
        Some(self.0)
    }
}

/// Shared market state: an optional default plus per-symbol overrides.
#[derive(Debug, Clone, Default)]
pub struct MarketStateVolatility {
    default: Option<f64>,
    overrides: HashMap<String, f64>,
}

impl MarketStateVolatility {
    pub fn new(default: Option<f64>) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>, volatility: f64) -> Self {
        self.overrides.insert(symbol.into(), volatility);
        self
    }
}

#[async_trait]
impl VolatilityProvider for MarketStateVolatility {
    async fn get_volatility(&self, symbol: &str) -> Option<f64> {
        self.overrides.get(symbol).copied().or(self.default)
    }
}
