use axum::{
    routing::{get, post},
    Router,
    Json,
    extract::{Path, State, Extension},
};
use shared::constants::{cooldown_error, ACCOUNT_NOT_LINKED_ERROR};
use shared::rate_limit::RateLimitType;
use shared::shared_gacha::*;
use std::time::Instant;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;
use crate::auth::middleware::UserId;
use crate::error::Error;
use crate::rate_limit::RateLimits;
use crate::AppState;

pub mod store;

pub use store::GachaStore;

pub fn create_router(limits: &RateLimits) -> Router<AppState> {
    Router::new()
        .route("/roll", post(roll).layer(limits.player(RateLimitType::Roll)))
        .route("/history/:user_id", get(history).layer(limits.player(RateLimitType::Api)))
}

/// The path user must be the token's subject
pub(crate) fn ensure_same_user(requested: &str, user_id: UserId) -> Result<Uuid, Error> {
    let requested = Uuid::parse_str(requested.trim())
        .map_err(|_| Error::BadRequest("Invalid user id".to_string()))?;
    if requested != user_id.0 {
        return Err(Error::Forbidden);
    }
    Ok(requested)
}

pub(crate) fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| OffsetDateTime::now_utc().unix_timestamp().to_string())
}

#[axum::debug_handler]
async fn roll(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<RollRequest>,
) -> Result<Json<RollResponse>, Error> {
    let user = ensure_same_user(&request.user_id, user_id)?;

    let tier = match request.tier_id.as_deref() {
        Some(id) => match tier(id) {
            Some(tier) => tier,
            None => return Ok(Json(RollResponse::failed(CODE_UNKNOWN_TIER, "Máquina desconocida"))),
        },
        None => default_tier(),
    };

    if !state.links.is_linked(user).await {
        return Ok(Json(RollResponse::failed(CODE_NOT_LINKED, ACCOUNT_NOT_LINKED_ERROR)));
    }

    if let Err(left) = state.gacha.try_begin_roll(user, state.config.roll_cooldown, Instant::now()).await {
        let secs = left.as_millis().div_ceil(1000) as u64;
        return Ok(Json(RollResponse::failed(CODE_COOLDOWN, cooldown_error(secs))));
    }

    let response = store::resolve_roll(tier, state.config.win_rate, &now_rfc3339());

    match &response.data {
        Some(result) => {
            tracing::info!("🎰 GACHA ROLL: user {} won {} ({}) on {}", user, result.reward_name, result.rarity.as_str(), tier.id);
            state.gacha.record(user, HistoryItem::from_result(result, tier.id)).await;
        }
        None => tracing::info!("🎰 GACHA ROLL: user {} lost on {}", user, tier.id),
    }

    Ok(Json(response))
}

#[axum::debug_handler]
async fn history(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(requested): Path<String>,
) -> Result<Json<HistoryResponse>, Error> {
    let user = ensure_same_user(&requested, user_id)?;
    let data = state.gacha.history(user).await;
    Ok(Json(HistoryResponse { success: true, data }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;
    use crate::test_helpers::*;

    #[tokio::test]
    async fn roll_requires_a_token() {
        let state = test_state();
        let (status, _) = send(&state, post_json("/gacha/roll", None, json!({ "userId": Uuid::new_v4() }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn roll_for_someone_else_is_forbidden() {
        let state = test_state();
        let user = linked_user(&state).await;
        let body = json!({ "userId": Uuid::new_v4() });
        let (status, _) = send(&state, post_json("/gacha/roll", Some(user), body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unlinked_account_gets_a_game_failure() {
        let state = test_state();
        let user = Uuid::new_v4();
        let (status, body) = send(&state, post_json("/gacha/roll", Some(user), json!({ "userId": user }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NOT_LINKED");
    }

    #[tokio::test]
    async fn win_is_returned_and_recorded() {
        let state = test_state();
        let user = linked_user(&state).await;
        let body = json!({ "userId": user, "tierId": "gold" });
        let (status, body) = send(&state, post_json("/gacha/roll", Some(user), body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let reward_id = body["data"]["reward_id"].as_str().unwrap().to_string();
        assert!(shared::shared_gacha::tier("gold").unwrap().reward(&reward_id).is_some());

        let (status, history) = send(&state, get(&format!("/gacha/history/{}", user), Some(user))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history["data"][0]["reward_id"], reward_id.as_str());
        assert_eq!(history["data"][0]["tier_id"], "gold");
    }

    #[tokio::test]
    async fn second_roll_hits_the_cooldown() {
        let state = test_state();
        let user = linked_user(&state).await;
        send(&state, post_json("/gacha/roll", Some(user), json!({ "userId": user }))).await;
        let (_, body) = send(&state, post_json("/gacha/roll", Some(user), json!({ "userId": user }))).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "COOLDOWN");
    }

    #[tokio::test]
    async fn unknown_tier_is_reported() {
        let state = test_state();
        let user = linked_user(&state).await;
        let body = json!({ "userId": user, "tierId": "obsidian" });
        let (_, body) = send(&state, post_json("/gacha/roll", Some(user), body)).await;
        assert_eq!(body["code"], "UNKNOWN_TIER");
    }

    #[tokio::test]
    async fn history_of_another_user_is_forbidden() {
        let state = test_state();
        let user = Uuid::new_v4();
        let (status, _) = send(&state, get(&format!("/gacha/history/{}", Uuid::new_v4()), Some(user))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
