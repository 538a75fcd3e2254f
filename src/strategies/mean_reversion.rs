//! Mean-reversion strategy on volatility-scaled bands.

use crate::error::SignalError;
use crate::indicators::calculate_mean_reversion_bands;
use crate::models::indicators::{closes, Candle, MeanReversionBands};
use crate::models::signal::{Signal, SignalRequest};
use crate::services::market_data::KlineSource;
use crate::services::volatility::VolatilityProvider;
use crate::signals::thresholds::mean_reversion_band_width;
use crate::strategies::SignalStrategy;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const STRATEGY_NAME: &str = "mean_reversion";
pub const DEFAULT_LOOKBACK: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanReversionEvaluation {
    pub volatility: f64,
    pub bands: MeanReversionBands,
    pub price: f64,
    pub signal: Signal,
}

/// Fades closes that stretch beyond `mean ± 2(1 + volatility)·σ` of the
/// lookback window. Unlike the RSI thresholds the band width is unbounded.
pub struct MeanReversionStrategy {
    source: Arc<dyn KlineSource>,
    volatility: Arc<dyn VolatilityProvider>,
    lookback: usize,
}

impl MeanReversionStrategy {
    pub fn new(source: Arc<dyn KlineSource>, volatility: Arc<dyn VolatilityProvider>) -> Self {
        Self {
            source,
            volatility,
            lookback: DEFAULT_LOOKBACK,
        }
    }

    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Evaluate the last `lookback` candles. `None` when the window is short.
    pub fn evaluate(&self, candles: &[Candle], volatility: f64) -> Option<MeanReversionEvaluation> {
        let closes = closes(candles);
        let bands =
            calculate_mean_reversion_bands(&closes, self.lookback, mean_reversion_band_width(volatility))?;
        let price = *closes.last()?;

        let signal = if price > bands.upper {
            Signal::Sell
        } else if price < bands.lower {
            Signal::Buy
        } else {
            Signal::Hold
        };

        Some(MeanReversionEvaluation {
            volatility,
            bands,
            price,
            signal,
        })
    }

    async fn resolve_volatility(&self, request: &SignalRequest) -> Result<f64, SignalError> {
        if let Some(volatility) = request.volatility {
            return Ok(volatility);
        }
        self.volatility
            .get_volatility(&request.symbol)
            .await
            .ok_or_else(|| SignalError::MissingVolatility {
                strategy: STRATEGY_NAME,
                symbol: request.symbol.clone(),
            })
    }
}

#[async_trait]
impl SignalStrategy for MeanReversionStrategy {
    fn name(&self) -> &'static str {
        STRATEGY_NAME
    }

    async fn generate_signal(&self, request: &SignalRequest) -> Result<Signal, SignalError> {
        let symbol = request.symbol.as_str();
        let candles = match self
            .source
            .get_klines(symbol, &request.timeframe, request.limit)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Kline fetch failed, returning hold signal");
                return Ok(Signal::Hold);
            }
        };

        if candles.len() < self.lookback {
            warn!(
                symbol = %symbol,
                count = candles.len(),
                lookback = self.lookback,
                "Not enough data to calculate mean reversion levels"
            );
            return Ok(Signal::Hold);
        }

        let volatility = self.resolve_volatility(request).await?;
        let Some(evaluation) = self.evaluate(&candles, volatility) else {
            return Ok(Signal::Hold);
        };

        info!(
            symbol = %symbol,
            signal = %evaluation.signal,
            price = evaluation.price,
            upper = evaluation.bands.upper,
            lower = evaluation.bands.lower,
            "Generated signal for {}: {}",
            symbol,
            evaluation.signal
        );

        Ok(evaluation.signal)
    }
}
