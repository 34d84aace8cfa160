//! Shared setup for the HTTP tests: an in-memory app and request helpers.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Request, Response};
use axum::Router;
use std::net::SocketAddr;
use tower::ServiceExt;
use wedding_api::{app_router, VoterSessionStore};
use wedding_app::infrastructure::security::RateLimiter;
use wedding_app::{AppContext, Config};

pub const ADMIN_TOKEN: &str = "letmein";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "ADMIN_TOKEN" => Some(ADMIN_TOKEN.to_string()),
        "SECURE_COOKIES" => Some("false".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn test_app() -> Router {
    with_client_addr(app_router(
        AppContext::in_memory(&test_config()),
        VoterSessionStore::new(),
    ))
}

pub fn test_app_with_limits(per_minute: u32, per_hour: u32) -> Router {
    let ctx = AppContext::in_memory(&test_config())
        .with_rate_limiter(RateLimiter::with_limits(per_minute, per_hour));
    with_client_addr(app_router(ctx, VoterSessionStore::new()))
}

fn with_client_addr(router: Router) -> Router {
    router.layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible router")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn with_header(mut request: Request<Body>, name: &'static str, value: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(name, value.parse().expect("valid header value"));
    request
}

pub fn as_admin(request: Request<Body>) -> Request<Body> {
    with_header(request, "authorization", &format!("Bearer {}", ADMIN_TOKEN))
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// `name=value` part of the session cookie set on `response`.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}
