#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use audit_trail_api::config::{LogFormat, ServerConfig, StoreBackend};
use audit_trail_api::router::build_app_router;
use audit_trail_api::state::AppState;
use audit_trail_db::store::{AuditEventStore, MemoryAuditEventStore};

pub const CLIENT_ID: &str = "billing-service";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the default 16 MiB body limit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        max_body_bytes: 16 * 1024 * 1024,
        log_format: LogFormat::Pretty,
        store_backend: StoreBackend::Memory,
    }
}

/// Build the full application router around the given store.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) production uses.
pub fn build_test_app(store: Arc<dyn AuditEventStore>) -> Router {
    build_app_router(AppState::new(store), &test_config())
}

/// Build the application router with a caller-adjusted configuration.
pub fn build_test_app_with(
    store: Arc<dyn AuditEventStore>,
    configure: impl FnOnce(&mut ServerConfig),
) -> Router {
    let mut config = test_config();
    configure(&mut config);
    build_app_router(AppState::new(store), &config)
}

/// Router backed by a fresh in-memory store, plus a handle on that store.
pub fn memory_app() -> (Router, Arc<MemoryAuditEventStore>) {
    let store = Arc::new(MemoryAuditEventStore::new());
    let app = build_test_app(store.clone());
    (app, store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// `GET uri`, with `X-Client-ID` when `client_id` is given.
pub async fn get(app: &Router, uri: &str, client_id: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(client_id) = client_id {
        builder = builder.header("X-Client-ID", client_id);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// `POST uri` with a JSON body.
pub async fn post_json(
    app: &Router,
    uri: &str,
    client_id: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    post_raw(app, uri, client_id, Some("application/json"), body.to_string()).await
}

/// `POST uri` with an arbitrary body and optional content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    client_id: Option<&str>,
    content_type: Option<&str>,
    body: impl Into<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(client_id) = client_id {
        builder = builder.header("X-Client-ID", client_id);
    }
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    send(app, builder.body(Body::from(body.into())).unwrap()).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Record an event and return the `event_id` the server assigned.
pub async fn create_event(app: &Router, client_id: &str, body: serde_json::Value) -> String {
    let response = post_json(app, "/event", Some(client_id), &body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["event_id"]
        .as_str()
        .unwrap()
        .to_string()
}
