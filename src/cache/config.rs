use crate::constants::{CURRENT_PRICES_TTL_SECS, HISTORICAL_TTL_SECS};
use chrono::Duration;

/// Which kind of payload a cache entry holds; selects the TTL used for
/// its own freshness decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    CurrentPrices,
    Historical,
}

/// TTL configuration for the price cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub current_prices_ttl: Duration,
    pub historical_ttl: Duration,
}

impl CacheConfig {
    pub fn get_ttl(&self, kind: CacheKind) -> Duration {
        match kind {
            CacheKind::CurrentPrices => self.current_prices_ttl,
            CacheKind::Historical => self.historical_ttl,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            current_prices_ttl: Duration::seconds(CURRENT_PRICES_TTL_SECS),
            historical_ttl: Duration::seconds(HISTORICAL_TTL_SECS),
        }
    }
}
