use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;
use crate::auth::create_token;
use crate::config::Config;
use crate::{create_app, AppState};

pub fn test_state() -> AppState {
    AppState::new(Config::for_tests()).unwrap()
}

/// Requests look proxied so the address-keyed limiter can find a client
pub fn with_client(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder.header("x-forwarded-for", "203.0.113.7")
}

fn with_auth(builder: axum::http::request::Builder, user: Option<Uuid>) -> axum::http::request::Builder {
    let builder = with_client(builder);
    match user {
        Some(user) => builder.header("Authorization", format!("Bearer {}", create_token(user, "test-secret", 3600))),
        None => builder,
    }
}

pub fn get(path: &str, user: Option<Uuid>) -> Request<Body> {
    with_auth(Request::get(path), user).body(Body::empty()).unwrap()
}

pub fn post_json(path: &str, user: Option<Uuid>, body: Value) -> Request<Body> {
    with_auth(Request::post(path), user)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Runs one request through a fresh router over the shared state
pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn linked_user(state: &AppState) -> Uuid {
    let user = Uuid::new_v4();
    let now = OffsetDateTime::now_utc();
    let (code, _) = state.links.issue_code(user, now).await.unwrap();
    let username = format!("p_{}", &user.simple().to_string()[..8]);
    state.links.confirm(&code, &username, now).await.unwrap();
    user
}
