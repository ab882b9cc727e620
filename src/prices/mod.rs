/// CoinGecko-compatible price client with cache-then-degrade semantics
///
/// Current-price requests walk an ordered chain until one tier produces
/// data: fresh cache, live fetch (retried with linear backoff), stale
/// cache, static fallback table. The chain never fails; every result is
/// tagged with the tier that served it.
use crate::cache::{CacheConfig, CacheKind, CacheStats, PriceCache};
use crate::constants::{
    API_BASE_URL, API_TIMEOUT_SECS, DAILY_INTERVAL_THRESHOLD_DAYS, DEFAULT_ASSETS,
    RETRY_ATTEMPTS, RETRY_BASE_DELAY_MS, USER_AGENT, VS_CURRENCIES,
};
use crate::errors::ApiError;
use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::future::Future;
use std::time::Duration;

pub mod fallback;
pub mod symbols;
pub mod types;

pub use types::{
    AssetQuote, DataTier, MarketChart, PriceMap, PriceSnapshot, TrendingCoin,
};

/// Retry behavior for current-price fetches
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    /// Attempt n failing waits base_delay * n before attempt n+1
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_ATTEMPTS,
            base_delay: Duration::from_millis(RETRY_BASE_DELAY_MS),
        }
    }
}

/// Client construction parameters
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::from_secs(API_TIMEOUT_SECS),
            cache: CacheConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Price API client. Owns its HTTP connection pool and its cache; two
/// clients share nothing.
pub struct PriceClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
    cache: PriceCache,
}

impl PriceClient {
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            retry: config.retry,
            cache: PriceCache::new(config.cache),
        })
    }

    /// Current prices for `ids`, or the default asset set when empty.
    ///
    /// Never fails: every failure path resolves to the freshest data
    /// available, down to the static table. The tier on the returned
    /// snapshot is the only degradation signal callers get.
    pub async fn current_prices(&self, ids: &[String]) -> PriceSnapshot {
        let ids: Vec<String> = if ids.is_empty() {
            DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect()
        } else {
            ids.to_vec()
        };
        let key = price_cache_key(&ids);

        if let Some(prices) = self.cache.get_fresh::<PriceMap>(&key) {
            debug!("[PRICES] cache hit for {}", key);
            return PriceSnapshot {
                prices,
                tier: DataTier::FreshCache,
            };
        }

        match self.fetch_with_retry(|| self.fetch_prices(&ids)).await {
            Ok(prices) => {
                self.cache.set(&key, CacheKind::CurrentPrices, &prices);
                info!("[PRICES] fetched {} assets live", prices.len());
                PriceSnapshot {
                    prices,
                    tier: DataTier::Live,
                }
            }
            Err(err) => {
                if let Some(prices) = self.cache.get_any::<PriceMap>(&key) {
                    warn!("[PRICES] serving stale cache for {}: {}", key, err);
                    PriceSnapshot {
                        prices,
                        tier: DataTier::StaleCache,
                    }
                } else {
                    warn!("[PRICES] serving static fallback: {}", err);
                    PriceSnapshot {
                        prices: fallback::fallback_table(),
                        tier: DataTier::Fallback,
                    }
                }
            }
        }
    }

    /// Market-chart series for one asset over `days`.
    ///
    /// One direct attempt, no retries. `None` means no data of any age
    /// could be produced, distinct from an empty series.
    pub async fn historical_data(&self, id: &str, days: u32) -> Option<MarketChart> {
        let key = history_cache_key(id, days);

        if let Some(chart) = self.cache.get_fresh::<MarketChart>(&key) {
            debug!("[PRICES] cache hit for {}", key);
            return Some(chart);
        }

        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=brl&days={}&interval={}",
            self.base_url,
            id,
            days,
            chart_interval(days)
        );

        match self.fetch_chart(&url).await {
            Ok(chart) => {
                self.cache.set(&key, CacheKind::Historical, &chart);
                info!("[PRICES] fetched {} chart points for {}", chart.len(), id);
                Some(chart)
            }
            Err(err) => match self.cache.get_any::<MarketChart>(&key) {
                Some(chart) => {
                    warn!("[PRICES] serving stale chart for {}: {}", key, err);
                    Some(chart)
                }
                None => {
                    warn!("[PRICES] no chart data for {}: {}", key, err);
                    None
                }
            },
        }
    }

    /// Trending coins. Empty on any failure; this endpoint has neither a
    /// cache nor a static fallback.
    pub async fn trending(&self) -> Vec<TrendingCoin> {
        let url = format!("{}/search/trending", self.base_url);

        match self.fetch_trending(&url).await {
            Ok(coins) => coins,
            Err(err) => {
                warn!("[PRICES] trending fetch failed: {}", err);
                Vec::new()
            }
        }
    }

    /// Cache entry counts, classified against the current-price TTL
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached payload
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Run `op` up to `max_attempts` times, sleeping base_delay * n after
    /// failed attempt n. Knows nothing about caching; the final error
    /// propagates to the caller's own degradation policy.
    async fn fetch_with_retry<T, F, Fut>(&self, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut last_err = None;

        for attempt in 1..=self.retry.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(
                        "[PRICES] attempt {}/{} failed: {}",
                        attempt, self.retry.max_attempts, err
                    );
                    last_err = Some(err);
                }
            }

            if attempt < self.retry.max_attempts {
                let delay = self.retry.base_delay * attempt;
                debug!("[PRICES] retrying in {}ms", delay.as_millis());
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_err.unwrap_or_else(|| ApiError::Network("no attempts were made".to_string())))
    }

    /// One GET against the simple-price endpoint
    async fn fetch_prices(&self, ids: &[String]) -> Result<PriceMap, ApiError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}&include_24hr_change=true&include_market_cap=true&include_24hr_vol=true&include_last_updated_at=true",
            self.base_url,
            ids.join(","),
            VS_CURRENCIES
        );

        debug!("[PRICES] GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let prices: PriceMap = response.json().await?;

        if prices.is_empty() {
            return Err(ApiError::EmptyResponse);
        }

        Ok(prices)
    }

    /// One GET against the market-chart endpoint
    async fn fetch_chart(&self, url: &str) -> Result<MarketChart, ApiError> {
        debug!("[PRICES] GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(response.json().await?)
    }

    /// One GET against the trending endpoint
    async fn fetch_trending(&self, url: &str) -> Result<Vec<TrendingCoin>, ApiError> {
        debug!("[PRICES] GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let parsed: types::TrendingResponse = response.json().await?;

        Ok(parsed
            .coins
            .into_iter()
            .map(|c| c.item.into_coin())
            .collect())
    }
}

/// Order-sensitive key for a current-price request; callers wanting cache
/// hits must pass ids in a consistent order.
fn price_cache_key(ids: &[String]) -> String {
    format!("prices:{}", ids.join(","))
}

fn history_cache_key(id: &str, days: u32) -> String {
    format!("history:{}:{}", id, days)
}

/// Hourly granularity up to the threshold, daily beyond it
fn chart_interval(days: u32) -> &'static str {
    if days > DAILY_INTERVAL_THRESHOLD_DAYS {
        "daily"
    } else {
        "hourly"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    /// Nothing listens on port 9; connections are refused immediately.
    const DEAD_URL: &str = "http://127.0.0.1:9";

    fn dead_client(expire_everything: bool) -> PriceClient {
        let cache = if expire_everything {
            CacheConfig {
                current_prices_ttl: ChronoDuration::zero(),
                historical_ttl: ChronoDuration::zero(),
            }
        } else {
            CacheConfig::default()
        };

        PriceClient::with_config(ClientConfig {
            base_url: DEAD_URL.to_string(),
            timeout: Duration::from_secs(1),
            cache,
            retry: RetryConfig {
                max_attempts: 3,
                base_delay: Duration::from_millis(5),
            },
        })
        .unwrap()
    }

    fn sample_prices() -> PriceMap {
        let mut prices = PriceMap::new();
        prices.insert(
            "bitcoin".to_string(),
            AssetQuote {
                brl: 390_000.0,
                usd: 71_000.0,
                usd_24h_change: Some(1.5),
                usd_market_cap: Some(1_400_000_000_000.0),
                usd_24h_vol: Some(30_000_000_000.0),
                last_updated_at: Some(1_722_000_000),
            },
        );
        prices
    }

    #[tokio::test]
    async fn fresh_cache_hit_skips_the_network() {
        let client = dead_client(false);
        let ids = vec!["bitcoin".to_string()];
        let seeded = sample_prices();
        client
            .cache
            .set(&price_cache_key(&ids), CacheKind::CurrentPrices, &seeded);

        let snapshot = client.current_prices(&ids).await;
        assert_eq!(snapshot.tier, DataTier::FreshCache);
        assert_eq!(snapshot.prices, seeded);
        assert!(snapshot.is_current());
    }

    #[tokio::test]
    async fn stale_cache_preferred_over_static_fallback() {
        let client = dead_client(true);
        let ids = vec!["bitcoin".to_string()];
        let seeded = sample_prices();
        client
            .cache
            .set(&price_cache_key(&ids), CacheKind::CurrentPrices, &seeded);

        let snapshot = client.current_prices(&ids).await;
        assert_eq!(snapshot.tier, DataTier::StaleCache);
        assert_eq!(snapshot.prices, seeded);
        assert!(!snapshot.is_current());
    }

    #[tokio::test]
    async fn static_fallback_when_nothing_cached() {
        let client = dead_client(false);

        let snapshot = client.current_prices(&[]).await;
        assert_eq!(snapshot.tier, DataTier::Fallback);
        assert_eq!(snapshot.prices, fallback::fallback_table());
    }

    #[tokio::test]
    async fn retry_runs_exactly_max_attempts_with_growing_delays() {
        let client = dead_client(false);
        let calls = AtomicU32::new(0);

        let started = Instant::now();
        let result: Result<(), ApiError> = client
            .fetch_with_retry(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ApiError::EmptyResponse) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 5ms after attempt 1 plus 10ms after attempt 2
        assert!(started.elapsed() >= Duration::from_millis(15));
    }

    #[tokio::test]
    async fn retry_stops_on_first_success() {
        let client = dead_client(false);
        let calls = AtomicU32::new(0);

        let result = client
            .fetch_with_retry(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 2 {
                        Err(ApiError::EmptyResponse)
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn historical_returns_none_sentinel_without_data() {
        let client = dead_client(false);
        let chart = client.historical_data("bitcoin", 7).await;
        assert!(chart.is_none());
    }

    #[tokio::test]
    async fn historical_serves_stale_chart_after_failed_refetch() {
        let client = dead_client(true);
        let seeded = MarketChart {
            prices: vec![[1_722_000_000_000.0, 70_000.0]],
            market_caps: Vec::new(),
            total_volumes: Vec::new(),
        };
        client
            .cache
            .set(&history_cache_key("bitcoin", 7), CacheKind::Historical, &seeded);

        let chart = client.historical_data("bitcoin", 7).await;
        assert_eq!(chart, Some(seeded));
    }

    #[tokio::test]
    async fn trending_degrades_to_empty_vec() {
        let client = dead_client(false);
        let coins = client.trending().await;
        assert!(coins.is_empty());
    }

    #[tokio::test]
    async fn clear_cache_forces_the_next_call_to_fetch() {
        let client = dead_client(false);
        let ids = vec!["bitcoin".to_string()];
        client
            .cache
            .set(&price_cache_key(&ids), CacheKind::CurrentPrices, &sample_prices());

        client.clear_cache();
        assert_eq!(client.cache_stats().total_entries, 0);

        // The seeded entry is gone, so the chain falls through the dead
        // endpoint to the static table instead of the cache.
        let snapshot = client.current_prices(&ids).await;
        assert_eq!(snapshot.tier, DataTier::Fallback);
    }

    #[test]
    fn cache_keys_are_order_and_parameter_sensitive() {
        let ab = price_cache_key(&["a".to_string(), "b".to_string()]);
        let ba = price_cache_key(&["b".to_string(), "a".to_string()]);
        assert_eq!(ab, "prices:a,b");
        assert_ne!(ab, ba);

        assert_ne!(
            history_cache_key("bitcoin", 7),
            history_cache_key("bitcoin", 30)
        );
    }

    #[test]
    fn interval_switches_to_daily_above_thirty_days() {
        assert_eq!(chart_interval(7), "hourly");
        assert_eq!(chart_interval(30), "hourly");
        assert_eq!(chart_interval(31), "daily");
        assert_eq!(chart_interval(90), "daily");
    }
}
