use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{AdviceQuery, AdviceResponse},
    services,
};
use crate::{
    auth::extractors::AuthUser, error::AppResult, extractors::AppQuery, state::AppState,
};

pub fn advice_routes() -> Router<AppState> {
    Router::new().route("/advice", get(advice))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn advice(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(q): AppQuery<AdviceQuery>,
) -> AppResult<Json<AdviceResponse>> {
    let clock = state.clock();
    let at = match q.date {
        Some(date) => clock.start_of(date),
        None => clock.now(),
    };
    let cache = services::advice_for_day(&state, auth.user_id, at).await?;
    Ok(Json(cache.into()))
}
