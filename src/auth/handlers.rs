use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use super::{
    dto::{AuthResponse, LoginRequest, RegisterRequest},
    extractors::AuthUser,
    services,
};
use crate::{error::AppResult, extractors::AppJson, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let (user, session) = services::register(&state, payload.as_new_user()).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(&user, &session))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (user, session) = services::login(&state, &payload.email, &payload.password).await?;
    Ok(Json(AuthResponse::new(&user, &session)))
}

#[instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    services::logout(&state, &auth.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
