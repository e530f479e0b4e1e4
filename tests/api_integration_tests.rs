//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles through the router, including the
//! interaction between cached reads and invalidating writes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use joke_api::{api::create_router, cache::ResponseCache, AppState, JokeStore};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use tower::ServiceExt;

// == Helper Functions ==

const SEED: &str = r#"[
    {"type": "general", "setup": "What do you call a fake noodle?", "punchline": "An impasta."},
    {"type": "programming", "setup": "Why do programmers prefer dark mode?", "punchline": "Because light attracts bugs."},
    {"type": "general", "setup": "Why did the scarecrow win an award?", "punchline": "He was outstanding in his field."},
    {"type": "knock-knock", "setup": "Knock knock. Who's there? Boo.", "punchline": "Don't cry, it's just a joke."}
]"#;

fn create_test_state() -> AppState {
    let jokes = JokeStore::from_json(SEED).unwrap();
    AppState::new(ResponseCache::new(300_000), jokes)
}

fn create_test_app() -> Router {
    create_router(create_test_state())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

// == Info Endpoints ==

#[tokio::test]
async fn test_ping_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"pong");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Read Endpoints ==

#[tokio::test]
async fn test_joke_by_id() {
    let app = create_test_app();

    let (status, json) = get(&app, "/jokes/2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "2");
    assert_eq!(json["type"], "programming");
    assert_eq!(json["rating"], 0.0);
    assert_eq!(json["votes"], 0);
}

#[tokio::test]
async fn test_joke_by_id_not_found() {
    let app = create_test_app();

    let (status, json) = get(&app, "/jokes/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["type"], "error");
    assert_eq!(json["message"], "joke not found");
}

#[tokio::test]
async fn test_random_endpoints() {
    let app = create_test_app();

    let (status, json) = get(&app, "/random_joke").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.get("setup").is_some());

    let (status, json) = get(&app, "/jokes/ten").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 4);

    let (status, json) = get(&app, "/jokes/random/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_random_select_rejects_bad_counts() {
    let app = create_test_app();

    let (status, json) = get(&app, "/jokes/random/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "The passed path is not a number.");

    let (status, json) = get(&app, "/jokes/random/50").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "The passed path exceeds the number of jokes (4).");
}

#[tokio::test]
async fn test_random_listing_is_cached_per_url() {
    let app = create_test_app();

    let (_, first) = get(&app, "/jokes/random/2").await;
    let (_, second) = get(&app, "/jokes/random/2").await;
    assert_eq!(first, second, "same URL is served from cache");

    let (_, stats) = get(&app, "/cache/stats").await;
    assert_eq!(stats["size"], 1);
    assert_eq!(stats["keys"], json!(["/jokes/random/2"]));
    assert_eq!(stats["hitRate"], 0.5);
    assert_eq!(stats["missRate"], 0.5);
}

#[tokio::test]
async fn test_jokes_by_type() {
    let app = create_test_app();

    let (status, json) = get(&app, "/jokes/general/ten").await;
    assert_eq!(status, StatusCode::OK);
    let jokes = json.as_array().unwrap();
    assert_eq!(jokes.len(), 2);
    assert!(jokes.iter().all(|joke| joke["type"] == "general"));

    let (status, json) = get(&app, "/jokes/programming/random").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_types_endpoint() {
    let app = create_test_app();

    let (status, json) = get(&app, "/types").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!(["general", "programming", "knock-knock"]));
}

#[tokio::test]
async fn test_search_endpoint() {
    let app = create_test_app();

    let (status, json) = get(&app, "/jokes/search?q=WHY").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (status, json) = get(&app, "/jokes/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Missing search query. Use ?q=searchterm");

    let (_, stats) = get(&app, "/cache/stats").await;
    assert_eq!(stats["size"], 0, "search results are not cached");
}

#[tokio::test]
async fn test_list_endpoint() {
    let app = create_test_app();

    let (status, json) = get(&app, "/jokes?type=general&sort=setup&order=desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["totalItems"], 2);
    assert_eq!(json["jokes"][0]["setup"], "Why did the scarecrow win an award?");

    let (status, json) = get(&app, "/jokes?page=2&pageSize=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["jokes"].as_array().unwrap().len(), 1);
    assert_eq!(json["pagination"]["currentPage"], 2);
    assert_eq!(json["pagination"]["totalPages"], 2);
}

// == Write Endpoints ==

#[tokio::test]
async fn test_add_joke() {
    let app = create_test_app();

    let body = json!({"type": "dad", "setup": "I only know 25 letters of the alphabet.", "punchline": "I don't know y."});
    let (status, json) = send(&app, "POST", "/jokes", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["type"], "dad");
    assert_eq!(json["rating"], 0.0);
    assert_eq!(json["votes"], 0);

    let id = json["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/jokes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json);
}

#[tokio::test]
async fn test_add_joke_missing_fields() {
    let app = create_test_app();

    let (status, json) = send(&app, "POST", "/jokes", Some(json!({"type": "dad"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Missing required fields: type, setup, punchline");
}

#[tokio::test]
async fn test_add_joke_refreshes_cached_types() {
    let app = create_test_app();

    let (_, before) = get(&app, "/types").await;
    assert_eq!(before.as_array().unwrap().len(), 3);

    let body = json!({"type": "pun", "setup": "s", "punchline": "p"});
    send(&app, "POST", "/jokes", Some(body)).await;

    let (_, after) = get(&app, "/types").await;
    assert_eq!(after, json!(["general", "programming", "knock-knock", "pun"]));
}

#[tokio::test]
async fn test_update_joke_keeps_rating() {
    let app = create_test_app();

    send(&app, "POST", "/jokes/1/rate", Some(json!({"value": 4}))).await;
    let (_, cached) = get(&app, "/jokes/1").await;
    assert_eq!(cached["setup"], "What do you call a fake noodle?");

    let body = json!({"type": "food", "setup": "Noodle?", "punchline": "Impasta!"});
    let (status, json) = send(&app, "PUT", "/jokes/1", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "food");
    assert_eq!(json["rating"], 4.0);
    assert_eq!(json["votes"], 1);

    let (_, fetched) = get(&app, "/jokes/1").await;
    assert_eq!(fetched["setup"], "Noodle?");
}

#[tokio::test]
async fn test_update_joke_not_found() {
    let app = create_test_app();

    let body = json!({"type": "a", "setup": "b", "punchline": "c"});
    let (status, _) = send(&app, "PUT", "/jokes/999", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Rating ==

#[tokio::test]
async fn test_rating_flow_invalidates_cached_joke() {
    let app = create_test_app();

    // Cache the unrated joke
    let (_, before) = get(&app, "/jokes/1").await;
    assert_eq!(before["rating"], 0.0);
    assert_eq!(before["votes"], 0);

    let (status, json) = send(&app, "POST", "/jokes/1/rate", Some(json!({"value": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rating"], 5.0);
    assert_eq!(json["votes"], 1);

    let (_, after_first) = get(&app, "/jokes/1").await;
    assert_eq!(after_first["rating"], 5.0);
    assert_eq!(after_first["votes"], 1);

    let (_, json) = send(&app, "POST", "/jokes/1/rate", Some(json!({"value": 3}))).await;
    assert_eq!(json["rating"], 4.0);
    assert_eq!(json["votes"], 2);

    let (_, after_second) = get(&app, "/jokes/1").await;
    assert_eq!(after_second["rating"], 4.0);
    assert_eq!(after_second["votes"], 2);
}

#[tokio::test]
async fn test_rating_accepts_zero() {
    let app = create_test_app();

    let (status, json) = send(&app, "POST", "/jokes/2/rate", Some(json!({"value": 0}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rating"], 0.0);
    assert_eq!(json["votes"], 1);
}

#[tokio::test]
async fn test_rating_out_of_range_rejected() {
    let app = create_test_app();

    for value in [json!(9), json!(-1), json!(5.5), json!("five"), json!(null)] {
        let (status, json) =
            send(&app, "POST", "/jokes/1/rate", Some(json!({ "value": value }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "value {value}");
        assert_eq!(
            json["message"],
            "Invalid rating value. Must be a number between 0 and 5."
        );
    }

    let (_, joke) = get(&app, "/jokes/1").await;
    assert_eq!(joke["rating"], 0.0);
    assert_eq!(joke["votes"], 0);
}

#[tokio::test]
async fn test_rating_unknown_joke() {
    let app = create_test_app();

    let (status, json) = send(&app, "POST", "/jokes/999/rate", Some(json!({"value": 3}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "joke not found");
}

// == Cache Endpoints ==

#[tokio::test]
async fn test_write_invalidates_joke_keys_only() {
    let state = create_test_state();
    {
        let mut cache = state.cache.write().await;
        cache.set("/jokes/random/5", json!("A"), None);
        cache.set("/jokes/7", json!("B"), None);
        cache.set("/health-report", json!("C"), None);
    }
    let app = create_router(state.clone());

    send(&app, "POST", "/jokes/1/rate", Some(json!({"value": 2}))).await;

    let mut cache = state.cache.write().await;
    assert!(cache.get("/jokes/random/5").is_none());
    assert!(cache.get("/jokes/7").is_none());
    assert_eq!(cache.get("/health-report"), Some(json!("C")));
}

#[tokio::test]
async fn test_cache_clear_endpoint() {
    let app = create_test_app();

    get(&app, "/types").await;
    get(&app, "/jokes/1").await;

    let (status, json) = send(&app, "DELETE", "/cache", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], 2);

    let (_, stats) = get(&app, "/cache/stats").await;
    assert_eq!(stats["size"], 0);
    assert_eq!(stats["hitRate"], 0.0);
    assert_eq!(stats["missRate"], 0.0);
}

#[tokio::test]
async fn test_cached_entry_expires_via_api() {
    let state = AppState::with_ttls(
        ResponseCache::new(300_000),
        JokeStore::from_json(SEED).unwrap(),
        joke_api::config::RouteTtls {
            random_ms: 50,
            joke_ms: 50,
            types_ms: 50,
        },
    );
    let app = create_router(state);

    get(&app, "/types").await;
    let (_, stats) = get(&app, "/cache/stats").await;
    assert_eq!(stats["size"], 1);

    sleep(Duration::from_millis(120)).await;

    let (_, stats) = get(&app, "/cache/stats").await;
    assert_eq!(stats["size"], 0);
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/jokes")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["type"], "error");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_rating_body_that_is_not_an_object() {
    let app = create_test_app();

    let (status, json) = send(&app, "POST", "/jokes/1/rate", Some(json!(9))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["type"], "error");
    assert_eq!(
        json["message"],
        "Invalid rating value. Must be a number between 0 and 5."
    );

    let (_, joke) = get(&app, "/jokes/1").await;
    assert_eq!(joke["votes"], 0);
    assert_eq!(joke["rating"], 0.0);
}

#[tokio::test]
async fn test_add_joke_wrong_field_type() {
    let app = create_test_app();

    let body = json!({"type": 5, "setup": "s", "punchline": "p"});
    let (status, json) = send(&app, "POST", "/jokes", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["type"], "error");

    let (_, page) = get(&app, "/jokes").await;
    assert_eq!(page["pagination"]["totalItems"], 4);
}

#[tokio::test]
async fn test_list_rejects_unknown_query_values() {
    let app = create_test_app();

    for uri in ["/jokes?sort=bogus", "/jokes?order=sideways", "/jokes?page=first"] {
        let (status, json) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["type"], "error", "{uri}");
    }

    let (stats_status, stats) = get(&app, "/cache/stats").await;
    assert_eq!(stats_status, StatusCode::OK);
    assert_eq!(stats["size"], 0, "rejected queries are never cached");
}
