//! Volatility-adaptive indicator periods and decision bounds.

use serde::{Deserialize, Serialize};

pub const BASE_RSI_PERIOD: usize = 14;
pub const MIN_RSI_PERIOD: usize = 5;
pub const MAX_RSI_PERIOD: usize = 20;

/// Band width, in standard deviations, at zero volatility.
pub const BASE_BAND_WIDTH: f64 = 2.0;

/// Parameters derived from one volatility estimate.
///
/// Higher volatility shortens the RSI window, pulls both RSI bounds toward 50
/// and demands a stronger ADX reading before acting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveThresholds {
    pub rsi_period: usize,
    pub overbought: f64,
    pub oversold: f64,
    pub adx_threshold: f64,
}

impl AdaptiveThresholds {
    pub fn from_volatility(volatility: f64) -> Self {
        Self {
            rsi_period: adaptive_rsi_period(volatility),
            overbought: (70.0 - volatility * 10.0).clamp(50.0, 80.0),
            oversold: (30.0 + volatility * 10.0).clamp(20.0, 50.0),
            adx_threshold: (15.0 + volatility * 10.0).clamp(10.0, 30.0),
        }
    }
}

/// `round(14 * (1 - volatility))` clamped to `[5, 20]`.
///
/// A NaN estimate saturates to zero in the cast and lands on the lower bound.
pub fn adaptive_rsi_period(volatility: f64) -> usize {
    let raw = (BASE_RSI_PERIOD as f64 * (1.0 - volatility)).round() as i64;
    raw.clamp(MIN_RSI_PERIOD as i64, MAX_RSI_PERIOD as i64) as usize
}

/// Band width for the mean-reversion strategy: `2 * (1 + volatility)`.
///
/// Not clamped; the width keeps growing with volatility.
pub fn mean_reversion_band_width(volatility: f64) -> f64 {
    BASE_BAND_WIDTH * (1.0 + volatility)
}
