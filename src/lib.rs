pub mod cache;
pub mod constants;
pub mod errors;
pub mod format;
pub mod prices;

pub use cache::{CacheConfig, CacheStats};
pub use errors::ApiError;
pub use prices::{
    AssetQuote, ClientConfig, DataTier, MarketChart, PriceClient, PriceSnapshot, RetryConfig,
    TrendingCoin,
};
