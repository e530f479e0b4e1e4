//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Fallback TTL for cache entries stored without one (5 minutes).
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in milliseconds for cache entries without explicit TTL
    pub default_ttl_ms: u64,
    /// Per-route cache TTLs
    pub ttls: RouteTtls,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// JSON file the joke store is seeded from
    pub jokes_path: Option<PathBuf>,
}

/// Cache TTLs in milliseconds for each class of cacheable route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTtls {
    /// Randomized listings (`/jokes/random`, `/jokes/ten`, `/jokes/:type/ten`, ...)
    pub random_ms: u64,
    /// Single-joke lookups and the paginated listing
    pub joke_ms: u64,
    /// The type catalog
    pub types_ms: u64,
}

impl Default for RouteTtls {
    fn default() -> Self {
        Self {
            random_ms: 60_000,
            joke_ms: 300_000,
            types_ms: 600_000,
        }
    }
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3005)
    /// - `DEFAULT_TTL_MS` - Default cache TTL in milliseconds (default: 300000)
    /// - `RANDOM_TTL_MS` - TTL for randomized listings (default: 60000)
    /// - `JOKE_TTL_MS` - TTL for single-joke lookups (default: 300000)
    /// - `TYPES_TTL_MS` - TTL for the type catalog (default: 600000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `JOKES_PATH` - JSON seed file (default: unset, empty store)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            default_ttl_ms: env_or("DEFAULT_TTL_MS", defaults.default_ttl_ms),
            ttls: RouteTtls {
                random_ms: env_or("RANDOM_TTL_MS", defaults.ttls.random_ms),
                joke_ms: env_or("JOKE_TTL_MS", defaults.ttls.joke_ms),
                types_ms: env_or("TYPES_TTL_MS", defaults.ttls.types_ms),
            },
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            jokes_path: env::var("JOKES_PATH")
                .ok()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3005,
            default_ttl_ms: DEFAULT_TTL_MS,
            ttls: RouteTtls::default(),
            cleanup_interval: 60,
            jokes_path: None,
        }
    }
}
