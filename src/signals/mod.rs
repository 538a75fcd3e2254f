//! Signal evaluation: adaptive thresholds and the batch engine.

pub mod engine;
pub mod thresholds;

pub use engine::{SignalEngine, SymbolSignal};
pub use thresholds::{adaptive_rsi_period, mean_reversion_band_width, AdaptiveThresholds};
