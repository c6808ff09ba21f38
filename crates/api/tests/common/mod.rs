//! Shared helpers for HTTP integration tests.
//!
//! Every test builds its own in-memory database, so tests never share
//! state and can run in any order.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use waypoint_api::config::ServerConfig;
use waypoint_api::router::build_app_router;
use waypoint_api::state::AppState;
use waypoint_db::DbPool;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Fresh in-memory database with all migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = waypoint_db::create_memory_pool().await.unwrap();
    waypoint_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Build the full application router, with the production middleware stack,
/// on top of `pool`.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request. Parameters go in the query string.
pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a form-encoded body.
pub async fn post_form(app: Router, uri: &str, fields: &[(&str, &str)]) -> Response {
    let body = fields
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a JSON string body (`"17"`, `"1"`) as a Rust string.
pub async fn body_string(response: Response) -> String {
    match body_json(response).await {
        serde_json::Value::String(value) => value,
        other => panic!("expected a JSON string body, got {other}"),
    }
}

/// Read a JSON string body holding a numeric ID.
pub async fn body_id(response: Response) -> i64 {
    body_string(response).await.parse().unwrap()
}
