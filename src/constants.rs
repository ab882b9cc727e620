/// Global constants used across pricewatch
///
/// This module contains system-wide constants that are not configurable
/// and are used across multiple modules.

// ============================================================================
// UPSTREAM API
// ============================================================================

/// Base URL of the CoinGecko-compatible price API
pub const API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Identifying user agent sent with every request
pub const USER_AGENT: &str = "pricewatch/0.1";

/// Per-request HTTP timeout
pub const API_TIMEOUT_SECS: u64 = 10;

/// Quote currencies requested from the price endpoint
pub const VS_CURRENCIES: &str = "brl,usd";

// ============================================================================
// DEFAULT ASSETS
// ============================================================================

/// Assets fetched when the caller does not name any
pub const DEFAULT_ASSETS: [&str; 5] = [
    "bitcoin",
    "ethereum",
    "solana",
    "binancecoin",
    "ripple",
];

/// Default window for historical chart requests
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

/// History windows above this many days are served at daily granularity
pub const DAILY_INTERVAL_THRESHOLD_DAYS: u32 = 30;

// ============================================================================
// CACHE
// ============================================================================

/// How long a current-price cache entry stays fresh
pub const CURRENT_PRICES_TTL_SECS: i64 = 60;

/// How long a historical-chart cache entry stays fresh
pub const HISTORICAL_TTL_SECS: i64 = 3600;

// ============================================================================
// RETRY
// ============================================================================

/// Attempts per price fetch before degrading to cached or static data
pub const RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts; attempt n waits base * n
pub const RETRY_BASE_DELAY_MS: u64 = 1000;
