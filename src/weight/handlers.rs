use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

use super::dto::{HistoryQuery, LogWeight, WeightEntry};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/weight", put(log_weight))
        .route("/weight/history", get(history))
        .route("/weight/latest", get(latest))
}

#[instrument(skip(state, body))]
async fn log_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<LogWeight>,
) -> Result<Json<WeightEntry>, AppError> {
    if !(20.0..=400.0).contains(&body.kg) {
        return Err(AppError::validation("weight must be between 20 and 400 kg"));
    }
    let date = body.date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let row = repo::upsert(&state.db, user_id, body.kg, date).await?;
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
async fn history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Vec<WeightEntry>>, AppError> {
    let limit = q.limit.clamp(1, 365);
    let rows = repo::history(&state.db, user_id, limit).await?;
    Ok(Json(rows.into_iter().map(WeightEntry::from).collect()))
}

#[instrument(skip(state))]
async fn latest(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Option<WeightEntry>>, AppError> {
    let row = repo::latest(&state.db, user_id).await?;
    Ok(Json(row.map(WeightEntry::from)))
}
