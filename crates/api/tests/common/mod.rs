#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

use polio_calendar_api::config::ServerConfig;
use polio_calendar_api::router::build_app_router;
use polio_calendar_api::state::AppState;
use polio_calendar_core::period::CalendarConfig;

/// "Today" for every integration test: a Wednesday in the third week of 2024.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Four week columns and a pinned clock, so the default window is
/// 2024-01-01 ..= 2024-01-28.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        calendar: CalendarConfig::uniform(4),
        today_override: Some(today()),
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        clock: config.clock(),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
