//! API Routes
//!
//! Configures the Axum router with all joke API endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_joke_handler, cache_clear_handler, cache_stats_handler, health_handler, index_handler,
    joke_by_id_handler, list_handler, ping_handler, random_joke_handler, random_select_handler,
    random_ten_handler, rate_joke_handler, search_handler, type_random_handler, type_ten_handler,
    types_handler, update_joke_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// The `:id` segment under `/jokes` carries either a joke id or a joke type,
/// depending on the route; the router requires one name per position.
///
/// # Middleware
/// - CORS: Allows any origin so the browser client can call the API
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/random_joke", get(random_joke_handler))
        .route("/random_ten", get(random_ten_handler))
        .route("/types", get(types_handler))
        .route("/jokes", get(list_handler).post(add_joke_handler))
        .route("/jokes/search", get(search_handler))
        .route("/jokes/random", get(random_joke_handler))
        .route("/jokes/ten", get(random_ten_handler))
        .route("/jokes/random/:num", get(random_select_handler))
        .route("/jokes/:id", get(joke_by_id_handler).put(update_joke_handler))
        .route("/jokes/:id/rate", post(rate_joke_handler))
        .route("/jokes/:id/random", get(type_random_handler))
        .route("/jokes/:id/ten", get(type_ten_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache", delete(cache_clear_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
