//! Cache Module
//!
//! Provides the in-memory response cache with TTL expiry and pattern invalidation.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::ResponseCache;
