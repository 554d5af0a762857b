//! Logged-in user extractor.
//!
//! Resolves the caller's session from `Authorization: Bearer <token>` or the
//! `X-Session-Token` header.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use domain::BusinessError;

use crate::app::AppState;
use crate::error::ApiError;

/// Alternate header carrying the session token.
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// The user owning the request's session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i32,
    /// Raw token, kept so logout can drop the session.
    pub token: String,
}

fn non_empty(token: &str) -> Option<&str> {
    Some(token.trim()).filter(|t| !t.is_empty())
}

/// Pull the session token out of the request headers. A non-empty bearer
/// token wins when both are present.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(non_empty);

    bearer.or_else(|| {
        headers
            .get(SESSION_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(non_empty)
    })
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token_from_headers(&parts.headers)
            .ok_or(BusinessError::UserNotLogin)?
            .to_string();

        let session = state
            .sessions
            .get_session(&token)
            .await
            .ok_or(BusinessError::UserNotLogin)?;

        Ok(SessionUser {
            user_id: session.user_id,
            token,
        })
    }
}
