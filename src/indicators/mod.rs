//! Indicator library: pure functions over borrowed candle or close windows.
//!
//! Every call recomputes from the raw window; no smoothing state survives
//! between calls.

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use momentum::rsi::{calculate_rsi, calculate_rsi_indicator, RSI_NEUTRAL};
pub use trend::adx::{calculate_adx, calculate_adx_indicator, DEFAULT_ADX_PERIOD};
pub use volatility::bands::calculate_mean_reversion_bands;
