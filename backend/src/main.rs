use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::http::header::HeaderName;
use axum::{middleware, Router};
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use crate::auth::middleware::require_auth;
use crate::config::{Config, ConfigError};
use crate::gacha::GachaStore;
use crate::link::LinkStore;
use crate::rate_limit::{rate_limit_message, RateLimits};

mod auth;
mod config;
mod error;
mod gacha;
mod link;
mod logging;
mod rate_limit;
#[cfg(test)]
mod test_helpers;

const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gacha: Arc<GachaStore>,
    pub links: Arc<LinkStore>,
    pub limits: Arc<RateLimits>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Arc::new(config),
            gacha: Arc::new(GachaStore::new()),
            links: Arc::new(LinkStore::new()),
            limits: Arc::new(RateLimits::new()?),
        })
    }
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static(link::SERVER_SECRET_HEADER),
        ])
        .allow_credentials(true)
}

pub fn create_app(state: AppState) -> Router {
    // auth runs first so the per-route governors can key on the user
    let player_routes = Router::new()
        .nest("/gacha", gacha::create_router(&state.limits))
        .merge(link::create_router(&state.limits))
        .layer(middleware::from_fn(rate_limit_message))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let server_routes = link::create_server_router(&state.limits)
        .layer(middleware::from_fn(rate_limit_message));

    Router::new()
        .route("/api/health_check", get(health_check))
        .merge(player_routes)
        .merge(server_routes)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors_layer(&state.config))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = Config::from_env()?;
    let addr = config.bind_addr;
    info!(
        "gacha win rate {:.2}, cooldown {}s, link confirm {}",
        config.win_rate,
        config.roll_cooldown.as_secs(),
        if config.link_server_secret.is_some() { "enabled" } else { "disabled" }
    );

    let state = AppState::new(config)?;
    state.limits.spawn_cleanup(RATE_LIMIT_CLEANUP_INTERVAL);
    let app = create_app(state);

    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use crate::test_helpers::*;

    #[tokio::test]
    async fn health_check_is_public() {
        let state = test_state();
        let (status, _) = send(&state, get("/api/health_check", None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_are_not_cached() {
        let state = test_state();
        let response = crate::create_app(state)
            .oneshot(Request::get("/api/health_check").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()["cache-control"], "no-store");
    }

    #[tokio::test]
    async fn bad_token_is_unauthorized() {
        let state = test_state();
        let request = Request::get("/gacha/history/x")
            .header("Authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }
}
