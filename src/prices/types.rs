/// Domain and response types for the price client
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One asset's quote from the simple-price endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    pub brl: f64,
    pub usd: f64,
    #[serde(default)]
    pub usd_24h_change: Option<f64>,
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
    #[serde(default)]
    pub usd_24h_vol: Option<f64>,
    #[serde(default)]
    pub last_updated_at: Option<i64>,
}

/// Mapping from asset id to its current quote
pub type PriceMap = HashMap<String, AssetQuote>;

/// Which tier of the fallback chain satisfied a price request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTier {
    /// Served from cache within the current-price TTL
    FreshCache,
    /// Fetched from the upstream API on this call
    Live,
    /// Cache past its TTL, served after a failed refetch
    StaleCache,
    /// Hardcoded table, served when no real data of any age exists
    Fallback,
}

impl std::fmt::Display for DataTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DataTier::FreshCache => "cache",
            DataTier::Live => "live",
            DataTier::StaleCache => "stale cache",
            DataTier::Fallback => "fallback",
        };
        write!(f, "{}", label)
    }
}

/// Price mapping plus the tier that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub prices: PriceMap,
    pub tier: DataTier,
}

impl PriceSnapshot {
    /// Whether the snapshot came from a live or fresh-cache tier
    pub fn is_current(&self) -> bool {
        matches!(self.tier, DataTier::FreshCache | DataTier::Live)
    }
}

/// Market-chart series for one asset.
///
/// Each point is [timestamp-ms, value], mirroring the upstream JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<[f64; 2]>,
    #[serde(default)]
    pub market_caps: Vec<[f64; 2]>,
    #[serde(default)]
    pub total_volumes: Vec<[f64; 2]>,
}

impl MarketChart {
    /// Number of price points
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if the series has no price points
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Most recent price point
    pub fn latest(&self) -> Option<&[f64; 2]> {
        self.prices.last()
    }

    /// All price values in series order
    pub fn price_values(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p[1]).collect()
    }
}

/// One coin from the trending endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
}

// ===== Response Types =====

#[derive(Debug, Deserialize)]
pub(crate) struct TrendingResponse {
    pub coins: Vec<TrendingItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrendingItem {
    pub item: TrendingCoinRaw,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrendingCoinRaw {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
}

impl TrendingCoinRaw {
    pub(crate) fn into_coin(self) -> TrendingCoin {
        TrendingCoin {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            market_cap_rank: self.market_cap_rank,
            thumb: self.thumb,
        }
    }
}
