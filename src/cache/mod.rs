/// In-memory TTL cache for upstream API payloads
///
/// Payloads are stored as opaque JSON values and retrieved through typed
/// accessors, so one cache serves both price mappings and market charts.
/// One entry per key; a new write for the same key overwrites, never
/// appends. Nothing is persisted across restarts.
use chrono::{DateTime, Utc};
use log::warn;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

mod config;

pub use config::{CacheConfig, CacheKind};

/// One cached payload with its fetch timestamp
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Value,
    pub fetched_at: DateTime<Utc>,
    pub kind: CacheKind,
}

impl CacheEntry {
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.fetched_at
    }
}

/// Cache statistics.
///
/// Every entry is classified against the current-price TTL, including
/// historical entries whose own freshness checks use the longer
/// historical TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub stale_entries: usize,
}

/// Thread-safe TTL cache owned by a single client instance
pub struct PriceCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    config: CacheConfig,
}

impl PriceCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Typed payload if an entry exists and is fresh under its kind's TTL
    pub fn get_fresh<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let entries = self.entries.read();
        let entry = entries.get(key)?;

        if entry.age() >= self.config.get_ttl(entry.kind) {
            return None;
        }

        serde_json::from_value(entry.payload.clone()).ok()
    }

    /// Typed payload regardless of age. Used for degraded reads where
    /// stale real data beats synthetic data.
    pub fn get_any<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        serde_json::from_value(entry.payload.clone()).ok()
    }

    /// Store a payload under `key`, overwriting any previous entry
    pub fn set<T>(&self, key: &str, kind: CacheKind, data: &T)
    where
        T: Serialize,
    {
        let payload = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                warn!("[CACHE] failed to serialize payload for {}: {}", key, e);
                return;
            }
        };

        let entry = CacheEntry {
            payload,
            fetched_at: Utc::now(),
            kind,
        };

        self.entries.write().insert(key.to_string(), entry);
    }

    /// Entry counts, every entry classified against the current-price TTL
    pub fn stats(&self) -> CacheStats {
        let ttl = self.config.current_prices_ttl;
        let entries = self.entries.read();

        let total = entries.len();
        let fresh = entries.values().filter(|e| e.age() < ttl).count();

        CacheStats {
            total_entries: total,
            fresh_entries: fresh,
            stale_entries: total - fresh,
        }
    }

    /// Remove every entry unconditionally
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
