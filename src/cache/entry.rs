//! Cache Entry Module
//!
//! Defines a single cached response together with its expiry timestamp.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A cached JSON response body and the moment it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached response body
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that lives for `ttl_ms` milliseconds.
    pub fn new(value: Value, ttl_ms: u64) -> Self {
        Self {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// The entry stays live up to and including `expires_at` and is expired
    /// from the first millisecond after it.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit clock reading.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now > self.expires_at
    }

    // == Refresh ==
    /// Pushes the expiry out to `ttl_ms` from now.
    pub fn refresh(&mut self, ttl_ms: u64) {
        self.expires_at = current_timestamp_ms().saturating_add(ttl_ms);
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
