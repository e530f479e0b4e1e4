//! Cache Statistics Module
//!
//! Tracks hit/miss counters and builds the snapshot reported by the stats endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Cumulative access counters since the last reset.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of lookups that found a live entry
    pub hits: u64,
    /// Number of lookups that found nothing or an expired entry
    pub misses: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        self.ratio(self.hits)
    }

    // == Miss Rate ==
    /// Returns misses / (hits + misses), or 0.0 if no lookups have been made.
    pub fn miss_rate(&self) -> f64 {
        self.ratio(self.misses)
    }

    fn ratio(&self, count: u64) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Reset ==
    /// Zeroes both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the cache, taken after expired entries were purged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of live entries
    pub size: usize,
    /// Keys of the live entries
    pub keys: Vec<String>,
    /// Fraction of lookups that hit, two decimals
    pub hit_rate: f64,
    /// Fraction of lookups that missed, two decimals
    pub miss_rate: f64,
}

impl StatsSnapshot {
    /// Builds a snapshot from live keys and the current counters.
    pub fn new(mut keys: Vec<String>, stats: &CacheStats) -> Self {
        keys.sort();
        Self {
            size: keys.len(),
            keys,
            hit_rate: round_two(stats.hit_rate()),
            miss_rate: round_two(stats.miss_rate()),
        }
    }
}

fn round_two(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}
