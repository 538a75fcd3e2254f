//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{AdxIndicator, Candle, MeanReversionBands, RsiIndicator};
pub use signal::{Signal, SignalRequest};
