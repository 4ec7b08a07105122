use axum::{
    routing::{get, post},
    Router,
    Json,
    extract::{Query, State, Extension},
    http::HeaderMap,
};
use serde::Deserialize;
use shared::rate_limit::RateLimitType;
use shared::shared_gacha::{
    LinkCheckResponse, LinkConfirmRequest, LinkConfirmResponse, LinkInitRequest, LinkInitResponse,
    LINK_CHECK_ENDPOINT, LINK_CONFIRM_ENDPOINT, LINK_INIT_ENDPOINT,
};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use crate::auth::middleware::UserId;
use crate::error::Error;
use crate::gacha::ensure_same_user;
use crate::rate_limit::RateLimits;
use crate::AppState;

pub mod store;

pub use store::{LinkError, LinkStore};

pub const SERVER_SECRET_HEADER: &str = "x-server-secret";

/// Routes called by the website on behalf of a signed-in player
pub fn create_router(limits: &RateLimits) -> Router<AppState> {
    Router::new()
        .route(LINK_CHECK_ENDPOINT, get(check_link_status).layer(limits.player(RateLimitType::Api)))
        .route(LINK_INIT_ENDPOINT, post(init).layer(limits.player(RateLimitType::LinkInit)))
}

/// Routes called by the Minecraft server plugin
pub fn create_server_router(limits: &RateLimits) -> Router<AppState> {
    Router::new().route(LINK_CONFIRM_ENDPOINT, post(confirm).layer(limits.server()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckQuery {
    user_id: String,
}

#[axum::debug_handler]
async fn check_link_status(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<LinkCheckResponse>, Error> {
    let user = ensure_same_user(&query.user_id, user_id)?;
    let minecraft_username = state.links.username(user).await;

    Ok(Json(LinkCheckResponse {
        success: true,
        linked: minecraft_username.is_some(),
        minecraft_username,
    }))
}

#[axum::debug_handler]
async fn init(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<LinkInitRequest>,
) -> Result<Json<LinkInitResponse>, Error> {
    let user = ensure_same_user(&request.user_id, user_id)?;

    let (code, expires_at) = state
        .links
        .issue_code(user, OffsetDateTime::now_utc())
        .await
        .map_err(|e| Error::Conflict(e.to_string()))?;

    let expires_at = expires_at
        .format(&Rfc3339)
        .map_err(|_| Error::BadRequest("Invalid expiry".to_string()))?;

    Ok(Json(LinkInitResponse { success: true, code, expires_at }))
}

#[axum::debug_handler]
async fn confirm(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LinkConfirmRequest>,
) -> Result<Json<LinkConfirmResponse>, Error> {
    let expected = state.config.link_server_secret.as_deref().ok_or(Error::Forbidden)?;
    let provided = headers.get(SERVER_SECRET_HEADER).and_then(|v| v.to_str().ok());
    if provided != Some(expected) {
        tracing::warn!("link confirm rejected: bad server secret");
        return Err(Error::Forbidden);
    }

    if !store::is_valid_username(&request.minecraft_username) {
        return Err(Error::BadRequest("Nombre de jugador no válido".to_string()));
    }

    match state.links.confirm(&request.code, &request.minecraft_username, OffsetDateTime::now_utc()).await {
        Ok(user) => {
            tracing::info!("🔗 Linked {} to Minecraft player {}", user, request.minecraft_username);
            Ok(Json(LinkConfirmResponse { success: true, message: None }))
        }
        Err(LinkError::UnknownCode) => Err(Error::NotFound(LinkError::UnknownCode.to_string())),
        Err(e) => Ok(Json(LinkConfirmResponse { success: false, message: Some(e.to_string()) })),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use uuid::Uuid;
    use crate::test_helpers::*;

    fn confirm_request(secret: Option<&str>, code: &str, username: &str) -> Request<Body> {
        let mut builder = with_client(Request::builder())
            .method("POST")
            .uri("/minecraft/link/confirm")
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header(super::SERVER_SECRET_HEADER, secret);
        }
        builder
            .body(Body::from(json!({ "code": code, "minecraftUsername": username }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn full_link_flow() {
        let state = test_state();
        let user = Uuid::new_v4();

        let (status, body) = send(&state, get(&format!("/minecraft/link/check?userId={}", user), Some(user))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["linked"], false);

        let (status, body) = send(&state, post_json("/minecraft/link/init", Some(user), json!({ "userId": user }))).await;
        assert_eq!(status, StatusCode::OK);
        let code = body["code"].as_str().unwrap().to_string();
        assert_eq!(code.len(), 6);

        let (status, body) = send(&state, confirm_request(Some("plugin-secret"), &code, "Steve")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, body) = send(&state, get(&format!("/minecraft/link/check?userId={}", user), Some(user))).await;
        assert_eq!(body["linked"], true);
        assert_eq!(body["minecraft_username"], "Steve");

        let (status, _) = send(&state, post_json("/minecraft/link/init", Some(user), json!({ "userId": user }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn confirm_needs_the_server_secret() {
        let state = test_state();
        let (status, _) = send(&state, confirm_request(None, "ABCDEF", "Steve")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&state, confirm_request(Some("guess"), "ABCDEF", "Steve")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn confirm_rejects_unknown_codes_and_bad_names() {
        let state = test_state();
        let (status, _) = send(&state, confirm_request(Some("plugin-secret"), "ZZZZZZ", "Steve")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&state, confirm_request(Some("plugin-secret"), "ZZZZZZ", "no spaces")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn check_for_someone_else_is_forbidden() {
        let state = test_state();
        let path = format!("/minecraft/link/check?userId={}", Uuid::new_v4());
        let (status, _) = send(&state, get(&path, Some(Uuid::new_v4()))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
