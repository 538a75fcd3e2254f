//! Adaptive RSI strategy gated by ADX trend strength.

use crate::error::SignalError;
use crate::indicators::{calculate_adx_indicator, calculate_rsi, DEFAULT_ADX_PERIOD};
use crate::models::indicators::{closes, AdxIndicator, Candle, RsiIndicator};
use crate::models::signal::{Signal, SignalRequest};
use crate::services::market_data::KlineSource;
use crate::signals::thresholds::{AdaptiveThresholds, BASE_RSI_PERIOD};
use crate::strategies::SignalStrategy;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const STRATEGY_NAME: &str = "rsi_adx";

/// Fewest closes the strategy will evaluate, whatever the adaptive period.
pub const MIN_CLOSES: usize = BASE_RSI_PERIOD + 1;

/// Notional order sizing used to veto trades too small to place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderSizing {
    pub balance_fraction: f64,
    pub nominal_balance: f64,
    pub min_order_size: f64,
}

impl Default for OrderSizing {
    fn default() -> Self {
        Self {
            balance_fraction: 0.1,
            nominal_balance: 1.0,
            min_order_size: 0.001,
        }
    }
}

impl OrderSizing {
    pub fn quantity(&self, price: f64) -> f64 {
        self.balance_fraction * self.nominal_balance / price
    }

    pub fn is_below_minimum(&self, price: f64) -> bool {
        self.quantity(price) < self.min_order_size
    }
}

/// Everything that went into one decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsiAdxEvaluation {
    pub volatility: f64,
    pub thresholds: AdaptiveThresholds,
    pub rsi: RsiIndicator,
    pub adx: AdxIndicator,
    pub price: f64,
    /// Decision from the indicators alone, before the order-size veto.
    pub indicator_signal: Signal,
    /// Notional quantity, computed only for non-hold indicator signals.
    pub quantity: Option<f64>,
    pub signal: Signal,
}

impl RsiAdxEvaluation {
    pub fn vetoed(&self) -> bool {
        !self.indicator_signal.is_hold() && self.signal.is_hold()
    }
}

/// Sell on overbought RSI, buy on oversold RSI, but only while ADX confirms a
/// trend. The RSI period follows volatility; ADX always uses 14 bars.
pub struct RsiAdxStrategy {
    source: Arc<dyn KlineSource>,
    sizing: OrderSizing,
}

impl RsiAdxStrategy {
    pub fn new(source: Arc<dyn KlineSource>) -> Self {
        Self {
            source,
            sizing: OrderSizing::default(),
        }
    }

    pub fn with_sizing(mut self, sizing: OrderSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn sizing(&self) -> &OrderSizing {
        &self.sizing
    }

    /// Evaluate a candle window. Returns `None` when there are fewer than
    /// [`MIN_CLOSES`] candles.
    pub fn evaluate(&self, candles: &[Candle], volatility: f64) -> Option<RsiAdxEvaluation> {
        if candles.len() < MIN_CLOSES {
            return None;
        }

        let closes = closes(candles);
        let price = *closes.last()?;
        let thresholds = AdaptiveThresholds::from_volatility(volatility);
        let rsi = RsiIndicator {
            value: calculate_rsi(&closes, thresholds.rsi_period),
            period: thresholds.rsi_period,
        };
        let adx = calculate_adx_indicator(candles, DEFAULT_ADX_PERIOD);

        let indicator_signal = decide(rsi.value, adx.value, &thresholds);
        let (quantity, signal) = if indicator_signal.is_hold() {
            (None, Signal::Hold)
        } else if self.sizing.is_below_minimum(price) {
            (Some(self.sizing.quantity(price)), Signal::Hold)
        } else {
            (Some(self.sizing.quantity(price)), indicator_signal)
        };

        Some(RsiAdxEvaluation {
            volatility,
            thresholds,
            rsi,
            adx,
            price,
            indicator_signal,
            quantity,
            signal,
        })
    }
}

/// Raw indicator decision, before any order-size veto.
pub fn decide(rsi: f64, adx: f64, thresholds: &AdaptiveThresholds) -> Signal {
    let trending = adx > thresholds.adx_threshold;
    if rsi > thresholds.overbought && trending {
        Signal::Sell
    } else if rsi < thresholds.oversold && trending {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

#[async_trait]
impl SignalStrategy for RsiAdxStrategy {
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

        if candles.is_empty() {
            warn!(symbol = %symbol, "No klines data, returning hold signal");
            return Ok(Signal::Hold);
        }

        if candles.len() < MIN_CLOSES {
            warn!(
                symbol = %symbol,
                count = candles.len(),
                required = MIN_CLOSES,
                "Not enough data, returning hold signal"
            );
            return Ok(Signal::Hold);
        }

        let volatility = request.volatility.ok_or_else(|| SignalError::MissingVolatility {
            strategy: STRATEGY_NAME,
            symbol: symbol.to_string(),
        })?;

        let Some(evaluation) = self.evaluate(&candles, volatility) else {
            return Ok(Signal::Hold);
        };

        if evaluation.vetoed() {
            warn!(
                symbol = %symbol,
                quantity = evaluation.quantity.unwrap_or_default(),
                min_order_size = self.sizing.min_order_size,
                "Order size below minimum, skipping trade"
            );
        }

        info!(
            symbol = %symbol,
            signal = %evaluation.signal,
            rsi = evaluation.rsi.value,
            rsi_period = evaluation.rsi.period,
            adx = evaluation.adx.value,
            overbought = evaluation.thresholds.overbought,
            oversold = evaluation.thresholds.oversold,
            adx_threshold = evaluation.thresholds.adx_threshold,
            "RSI signal for {}: {}",
            symbol,
            evaluation.signal
        );

        Ok(evaluation.signal)
    }
}
