use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    body::Body,
};
use uuid::Uuid;
use super::{validate_jwt, AuthError};
use crate::AppState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserId(pub Uuid);

pub fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&request).ok_or(AuthError::MissingToken)?;
    let user_id = validate_jwt(token, &state.config.jwt_secret)?;

    request.extensions_mut().insert(UserId(user_id));
    Ok(next.run(request).await)
}
