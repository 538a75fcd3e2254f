//! MEXC spot market data (public endpoints only).

mod client;

pub use client::{parse_klines, MexcKlineSource};
