//! API Handlers
//!
//! HTTP request handlers for the joke routes and cache inspection routes.
//!
//! Reads go through the response cache keyed by path + query string. Every
//! successful write invalidates the cached joke responses.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{ResponseCache, StatsSnapshot};
use crate::config::{Config, RouteTtls};
use crate::error::{ApiError, Result};
use crate::models::{
    ClearResponse, HealthResponse, Joke, JokeRequest, ListParams, RateRequest, SearchParams,
};
use crate::rating::{invalid_vote, validate_vote};
use crate::store::JokeStore;

/// Key substrings whose cached responses depend on joke data.
pub const INVALIDATION_PATTERNS: [&str; 3] = ["/jokes", "/random_", "/types"];

/// Application state shared across all handlers.
///
/// The cache and the store are each behind their own lock. Handlers that
/// need both always lock the store first.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<ResponseCache>>,
    /// Thread-safe joke store
    pub jokes: Arc<RwLock<JokeStore>>,
    /// Per-route cache TTLs
    pub ttls: RouteTtls,
}

impl AppState {
    /// Creates a new AppState with default route TTLs.
    pub fn new(cache: ResponseCache, jokes: JokeStore) -> Self {
        Self::with_ttls(cache, jokes, RouteTtls::default())
    }

    pub fn with_ttls(cache: ResponseCache, jokes: JokeStore, ttls: RouteTtls) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            jokes: Arc::new(RwLock::new(jokes)),
            ttls,
        }
    }

    /// Creates a new AppState from configuration and a loaded store.
    pub fn from_config(config: &Config, jokes: JokeStore) -> Self {
        let cache = ResponseCache::new(config.default_ttl_ms);
        Self::with_ttls(cache, jokes, config.ttls)
    }
}

// == Cache Helpers ==

/// The cache key for a request: path plus query string.
pub fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Serves a cached response for `uri` or computes, caches and returns a fresh one.
///
/// Errors from `produce` are returned as-is and never cached.
async fn cached<T, F>(state: &AppState, uri: &Uri, ttl_ms: u64, produce: F) -> Result<Response>
where
    T: Serialize,
    F: FnOnce(&JokeStore) -> Result<T>,
{
    let key = cache_key(uri);

    if let Some(body) = state.cache.write().await.get(&key) {
        debug!(key = %key, "Cache hit");
        return Ok(Json(body).into_response());
    }
    debug!(key = %key, "Cache miss");

    // The store guard is held until the insert so a concurrent write cannot
    // invalidate before this response lands in the cache.
    let jokes = state.jokes.read().await;
    let data = produce(&*jokes)?;

    match serde_json::to_value(&data) {
        Ok(body) => {
            state.cache.write().await.set(key, body.clone(), Some(ttl_ms));
            Ok(Json(body).into_response())
        }
        Err(err) => {
            warn!(key = %key, error = %err, "Response not cached");
            Ok(Json(data).into_response())
        }
    }
}

/// Drops every cached response derived from joke data.
async fn invalidate_jokes(state: &AppState) {
    let mut cache = state.cache.write().await;
    let removed: usize = INVALIDATION_PATTERNS
        .iter()
        .map(|pattern| cache.invalidate_pattern(pattern))
        .sum();
    debug!(removed, "Invalidated cached joke responses");
}

fn joke_not_found() -> ApiError {
    ApiError::NotFound("joke not found".to_string())
}

// == Info Routes ==

/// Handler for GET /
pub async fn index_handler() -> &'static str {
    "Try /random_joke, /random_ten, /jokes/random, /jokes/search?q=term, or /jokes/ten, /jokes/random/<any-number>"
}

/// Handler for GET /ping
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Random Listings ==

/// Handler for GET /random_joke and GET /jokes/random
pub async fn random_joke_handler(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    cached(&state, &uri, state.ttls.random_ms, |jokes| {
        jokes.random_one().ok_or_else(joke_not_found)
    })
    .await
}

/// Handler for GET /random_ten and GET /jokes/ten
pub async fn random_ten_handler(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    cached(&state, &uri, state.ttls.random_ms, |jokes| Ok(jokes.random_n(10))).await
}

/// Handler for GET /jokes/random/:num
///
/// Rejects anything that is not a positive count no larger than the store.
pub async fn random_select_handler(
    State(state): State<AppState>,
    Path(num): Path<String>,
    uri: Uri,
) -> Result<Response> {
    let num = num
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ApiError::Validation("The passed path is not a number.".to_string()))?;

    cached(&state, &uri, state.ttls.random_ms, |jokes| {
        let count = jokes.count();
        if num > count {
            return Err(ApiError::Validation(format!(
                "The passed path exceeds the number of jokes ({}).",
                count
            )));
        }
        Ok(jokes.random_n(num))
    })
    .await
}

/// Handler for GET /jokes/:type/random
pub async fn type_random_handler(
    State(state): State<AppState>,
    Path(joke_type): Path<String>,
    uri: Uri,
) -> Result<Response> {
    cached(&state, &uri, state.ttls.random_ms, |jokes| {
        Ok(jokes.by_type(&joke_type, 1))
    })
    .await
}

/// Handler for GET /jokes/:type/ten
pub async fn type_ten_handler(
    State(state): State<AppState>,
    Path(joke_type): Path<String>,
    uri: Uri,
) -> Result<Response> {
    cached(&state, &uri, state.ttls.random_ms, |jokes| {
        Ok(jokes.by_type(&joke_type, 10))
    })
    .await
}

// == Lookups ==

/// Handler for GET /jokes/search?q=
///
/// Never cached.
pub async fn search_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Joke>>> {
    let Query(params) = params?;
    let term = params.term().ok_or_else(|| {
        ApiError::Validation("Missing search query. Use ?q=searchterm".to_string())
    })?;

    let jokes = state.jokes.read().await;
    Ok(Json(jokes.search(term)))
}

/// Handler for GET /jokes
pub async fn list_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
    uri: Uri,
) -> Result<Response> {
    let Query(params) = params?;
    cached(&state, &uri, state.ttls.joke_ms, |jokes| Ok(jokes.list(&params))).await
}

/// Handler for GET /jokes/:id
pub async fn joke_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Response> {
    cached(&state, &uri, state.ttls.joke_ms, |jokes| {
        jokes.by_id(&id).ok_or_else(joke_not_found)
    })
    .await
}

/// Handler for GET /types
pub async fn types_handler(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    cached(&state, &uri, state.ttls.types_ms, |jokes| Ok(jokes.types())).await
}

// == Writes ==

/// Handler for POST /jokes
pub async fn add_joke_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<JokeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Joke>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let mut jokes = state.jokes.write().await;
    let joke = jokes.add(req.into_fields());
    invalidate_jokes(&state).await;

    info!(id = %joke.id, joke_type = %joke.joke_type, "Added joke");
    Ok((StatusCode::CREATED, Json(joke)))
}

/// Handler for PUT /jokes/:id
pub async fn update_joke_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<JokeRequest>, JsonRejection>,
) -> Result<Json<Joke>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let mut jokes = state.jokes.write().await;
    let joke = jokes
        .update(&id, req.into_fields())
        .ok_or_else(joke_not_found)?;
    invalidate_jokes(&state).await;

    info!(id = %joke.id, "Updated joke");
    Ok(Json(joke))
}

/// Handler for POST /jokes/:id/rate
///
/// The vote is validated before it reaches the aggregator.
pub async fn rate_joke_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<RateRequest>, JsonRejection>,
) -> Result<Json<Joke>> {
    // A body that is not a `{value}` object carries no usable vote either
    let Json(req) = payload.map_err(|_| invalid_vote())?;
    let vote = req.vote().ok_or_else(invalid_vote)?;
    let vote = validate_vote(vote)?;

    let mut jokes = state.jokes.write().await;
    let joke = jokes.rate(&id, vote).ok_or_else(joke_not_found)?;
    invalidate_jokes(&state).await;

    debug!(id = %joke.id, vote, rating = joke.rating, votes = joke.votes, "Rated joke");
    Ok(Json(joke))
}

// == Cache Routes ==

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    // Write lock: stats purges expired entries first
    let mut cache = state.cache.write().await;
    Json(cache.stats())
}

/// Handler for DELETE /cache
pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    // Only live entries count as cleared
    cache.cleanup();
    let cleared = cache.len();
    cache.clear();

    info!(cleared, "Cache cleared");
    Json(ClearResponse::new(cleared))
}
