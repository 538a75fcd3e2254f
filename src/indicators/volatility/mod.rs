//! Volatility indicators: mean-reversion bands

pub mod bands;

pub use bands::*;
