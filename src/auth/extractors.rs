use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::services::authenticate;
use crate::{
    domain::{DomainError, SessionId, UserId},
    error::AppError,
    state::AppState,
};

/// Authenticated caller, resolved from `Authorization: Bearer <session id>`.
pub struct AuthUser {
    pub user_id: UserId,
    pub session_id: SessionId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(DomainError::SessionNotFound)?;
        let (user_id, session_id) = authenticate(state, token).await?;
        Ok(Self {
            user_id,
            session_id,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
}
