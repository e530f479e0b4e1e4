//! Response Cache Module
//!
//! HashMap-backed response cache with lazy TTL expiry and substring invalidation.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats, StatsSnapshot};

// == Response Cache ==
/// In-memory cache of serialized responses keyed by request URL.
///
/// Expired entries are logically absent from the moment their expiry passes.
/// They are physically removed on the next `get` of that key, by `cleanup`,
/// or by `stats` (which runs `cleanup` first).
#[derive(Debug)]
pub struct ResponseCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Hit/miss counters
    stats: CacheStats,
    /// TTL in milliseconds for entries stored without an explicit TTL
    default_ttl_ms: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache with the given default TTL in milliseconds.
    pub fn new(default_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl_ms,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry for `key`.
    ///
    /// # Arguments
    /// * `key` - The cache key, conventionally path + query string
    /// * `value` - The response body to store
    /// * `ttl_ms` - Optional TTL in milliseconds (uses the default if None)
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl_ms: Option<u64>) {
        let ttl_ms = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.entries.insert(key.into(), CacheEntry::new(value, ttl_ms));
    }

    // == Set Many ==
    /// Stores every pair with the same TTL.
    pub fn set_many<I, K>(&mut self, entries: I, ttl_ms: Option<u64>)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in entries {
            self.set(key, value, ttl_ms);
        }
    }

    // == Get ==
    /// Returns the value for `key` if it is present and live.
    ///
    /// An expired entry is removed and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            debug!(key, "Evicted expired cache entry on read");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Has ==
    /// Checks whether `key` is present and live without evicting anything.
    pub fn has(&mut self, key: &str) -> bool {
        let exists = self
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired());

        if exists {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        exists
    }

    // == Touch ==
    /// Resets the expiry of a live entry to `ttl_ms` from now.
    ///
    /// Returns false if the key is absent or already expired.
    pub fn touch(&mut self, key: &str, ttl_ms: u64) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.refresh(ttl_ms);
                true
            }
            _ => false,
        }
    }

    // == Delete ==
    /// Removes an entry by key. Missing keys are ignored.
    pub fn del(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Invalidate Pattern ==
    /// Removes every entry whose key contains `pattern`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_pattern(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        let removed = before - self.entries.len();

        debug!(pattern, removed, "Invalidated cache entries");
        removed
    }

    // == Clear ==
    /// Removes all entries and resets the hit/miss counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_metrics();
    }

    // == Reset Metrics ==
    /// Resets the hit/miss counters, keeping the entries.
    pub fn reset_metrics(&mut self) {
        self.stats.reset();
    }

    // == Stats ==
    /// Purges expired entries, then reports the live keys and access rates.
    pub fn stats(&mut self) -> StatsSnapshot {
        self.cleanup();
        let keys = self.entries.keys().cloned().collect();
        StatsSnapshot::new(keys, &self.stats)
    }

    // == Cleanup ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TTL_MS)
    }
}
