//! TTL Cleanup Task
//!
//! Background task that periodically purges expired cached responses.
//!
//! Reads already ignore expired entries, so this only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between cleanup runs. It acquires a write lock on the cache to remove
/// expired entries.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ResponseCache::new(300_000)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<RwLock<ResponseCache>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {}ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup()
            };

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
