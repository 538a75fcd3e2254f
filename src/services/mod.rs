//! Collaborators that feed the engine: kline sources and volatility estimates.

pub mod cache;
pub mod market_data;
pub mod mexc;
pub mod volatility;

pub use cache::CachedKlineSource;
pub use market_data::{KlineSource, StaticKlineSource};
pub use mexc::MexcKlineSource;
pub use volatility::{FixedVolatility, MarketStateVolatility, VolatilityProvider};
