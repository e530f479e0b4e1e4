//! Response DTOs for the joke API
//!
//! Defines the structure of outgoing HTTP response bodies that are not plain jokes.

use serde::Serialize;

use crate::models::Joke;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Paging metadata of a joke listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(current_page: usize, page_size: usize, total_items: usize) -> Self {
        Self {
            current_page,
            total_pages: total_items.div_ceil(page_size),
            page_size,
            total_items,
        }
    }
}

/// Response body for the joke listing (GET /jokes)
#[derive(Debug, Clone, Serialize)]
pub struct JokePage {
    pub jokes: Vec<Joke>,
    pub pagination: Pagination,
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: "Cache cleared".to_string(),
            cleared,
        }
    }
}
