use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::auth::AuthUser;
use crate::diary::summary::{self, WaterDay};
use crate::error::AppError;
use crate::state::AppState;
use crate::targets::{self, DEFAULT_TARGETS};

use super::dto::{
    AddWater, DayQuery, RangeQuery, WaterDayResponse, WaterLogResponse, DEFAULT_GLASS_ML,
};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/water", post(add))
        .route("/water/last", delete(remove_last))
        .route("/water/day", get(day))
        .route("/water/range", get(range))
}

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

#[instrument(skip(state, body))]
async fn add(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AddWater>,
) -> Result<(StatusCode, Json<WaterLogResponse>), AppError> {
    let ml = body.ml.unwrap_or(DEFAULT_GLASS_ML);
    if ml <= 0 {
        return Err(AppError::validation("volume must be positive"));
    }
    let date = body.date.unwrap_or_else(today);
    let row = repo::insert(&state.db, user_id, ml, date).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Undo for the double-tap case: removes the most recent entry of the
/// day, whatever its volume.
#[instrument(skip(state))]
async fn remove_last(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<StatusCode, AppError> {
    let date = q.date.unwrap_or_else(today);
    if repo::delete_last(&state.db, user_id, date).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

#[instrument(skip(state))]
async fn day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<WaterDayResponse>, AppError> {
    let date = q.date.unwrap_or_else(today);
    let (total_ml, glasses) = repo::day_totals(&state.db, user_id, date).await?;
    let goal_ml = targets::repo::get_targets(&state.db, user_id)
        .await?
        .unwrap_or(DEFAULT_TARGETS)
        .water_ml;
    Ok(Json(WaterDayResponse {
        date,
        total_ml,
        glasses,
        goal_ml,
    }))
}

#[instrument(skip(state))]
async fn range(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Vec<WaterDay>>, AppError> {
    let last = today();
    let first = q.window.first_date(last);
    let entries = repo::list_in_range(&state.db, user_id, first, last).await?;
    Ok(Json(summary::water_range(last, q.window, &entries)))
}
