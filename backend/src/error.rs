use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum Error {
    Auth(crate::auth::AuthError),
    /// Token subject and requested user differ
    Forbidden,
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    RateLimited(&'static str),
}

impl From<crate::auth::AuthError> for Error {
    fn from(err: crate::auth::AuthError) -> Self {
        Error::Auth(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Auth(e) => return e.into_response(),
            Error::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            Error::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Error::Conflict(message) => (StatusCode::CONFLICT, message),
            Error::RateLimited(message) => (StatusCode::TOO_MANY_REQUESTS, message.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
