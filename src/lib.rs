//! Joke API - A joke-serving REST API
//!
//! Serves, searches, rates and edits jokes behind an in-memory response cache
//! with TTL expiry and pattern-based invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod rating;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::JokeStore;
pub use tasks::spawn_cleanup_task;
