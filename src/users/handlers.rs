use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{ProfileResponse, TargetsResponse, UpdateProfileRequest},
    services,
};
use crate::{
    auth::extractors::AuthUser, error::AppResult, extractors::AppJson, state::AppState,
};

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/me/profile", put(update_profile))
        .route("/me/targets", get(targets))
}

#[instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<ProfileResponse>> {
    let user = services::profile(&state, auth.user_id).await?;
    Ok(Json(ProfileResponse::from(&user)))
}

#[instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let user = services::update_profile(&state, auth.user_id, payload.as_update()).await?;
    Ok(Json(ProfileResponse::from(&user)))
}

#[instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn targets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<TargetsResponse>> {
    let targets = services::targets(&state, auth.user_id).await?;
    Ok(Json(targets.into()))
}
