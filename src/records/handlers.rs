use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateRecordRequest, RecordResponse, RecordsQuery, StatisticsQuery, StatisticsResponse},
    services,
};
use crate::{
    auth::extractors::AuthUser,
    error::AppResult,
    extractors::{AppJson, AppQuery},
    state::AppState,
};

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records).post(create_record))
        .route("/records/:id", get(get_record).delete(delete_record))
        .route("/statistics", get(statistics))
}

#[instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(payload): AppJson<CreateRecordRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<RecordResponse>)> {
    let view = services::create_record(
        &state,
        auth.user_id,
        payload.eaten_at,
        &payload.items(),
        payload.pfc(),
    )
    .await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/records/{}", view.record.id())) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(view.into())))
}

#[instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(q): AppQuery<RecordsQuery>,
) -> AppResult<Json<Vec<RecordResponse>>> {
    let records = services::list_records(&state, auth.user_id, q.from, q.to).await?;
    Ok(Json(records.iter().map(RecordResponse::from).collect()))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn get_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<RecordResponse>> {
    let view = services::get_record(&state, auth.user_id, &id).await?;
    Ok(Json(view.into()))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    services::delete_record(&state, auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(q): AppQuery<StatisticsQuery>,
) -> AppResult<Json<StatisticsResponse>> {
    let stats = services::statistics(&state, auth.user_id, &q.period).await?;
    Ok(Json(stats.into()))
}
