use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::catalog::{self, CatalogRef};
use crate::error::AppError;
use crate::nutrients::MacroSet;
use crate::state::AppState;
use crate::targets::{self, DEFAULT_TARGETS};

use super::dto::{CreateWeighing, DayQuery, RangeQuery, UpdateWeighing, WeighingResponse, WeighingSource};
use super::repo;
use super::summary::{self, DailySummary, NutritionDay};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/weighings", post(create_weighing).get(list_weighings))
        .route(
            "/weighings/:id",
            axum::routing::patch(edit_weighing).delete(delete_weighing),
        )
        .route("/summary/daily", get(daily))
        .route("/summary/range", get(range))
}

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

/// Log a food. The macro snapshot is computed here, once, from the
/// resolved per-100g values; reads never go back to the catalog.
#[instrument(skip(state, body))]
async fn create_weighing(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateWeighing>,
) -> Result<(StatusCode, Json<WeighingResponse>), AppError> {
    if body.grams <= 0.0 {
        return Err(AppError::validation("grams must be positive"));
    }
    let date = body.date.unwrap_or_else(today);

    let (cat_ref, name, per_100g) = match body.source {
        WeighingSource::Product { id } => {
            let (name, per) = catalog::repo::resolve(&state.db, user_id, CatalogRef::Global(id))
                .await?
                .ok_or(AppError::NotFound)?;
            (CatalogRef::Global(id), name, per)
        }
        WeighingSource::UserProduct { id } => {
            let (name, per) = catalog::repo::resolve(&state.db, user_id, CatalogRef::Private(id))
                .await?
                .ok_or(AppError::NotFound)?;
            (CatalogRef::Private(id), name, per)
        }
        WeighingSource::Manual { name, per_100g } => {
            if name.trim().is_empty() {
                return Err(AppError::validation("name is required"));
            }
            (CatalogRef::None, name.trim().to_string(), per_100g)
        }
    };

    let macros = MacroSet::from_per_100g(&per_100g, body.grams);
    let row = repo::insert(
        &state.db, user_id, cat_ref, &name, body.grams, body.meal, macros, date,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[instrument(skip(state))]
async fn list_weighings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<WeighingResponse>>, AppError> {
    let date = q.date.unwrap_or_else(today);
    let rows = repo::list_for_date(&state.db, user_id, date).await?;
    Ok(Json(rows.into_iter().map(WeighingResponse::from).collect()))
}

/// Edit grams and/or meal bucket. A grams change rescales the stored
/// macro snapshot proportionally; the catalog item (possibly changed or
/// deleted since) is not consulted.
#[instrument(skip(state, body))]
async fn edit_weighing(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateWeighing>,
) -> Result<Json<WeighingResponse>, AppError> {
    let existing = repo::get(&state.db, user_id, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let grams = body.grams.unwrap_or(existing.grams);
    if grams <= 0.0 {
        return Err(AppError::validation("grams must be positive"));
    }
    let meal = body.meal.unwrap_or(existing.meal);
    let macros = if grams != existing.grams {
        existing.macros().rescale(existing.grams, grams)
    } else {
        existing.macros()
    };

    let updated = repo::update(&state.db, user_id, id, grams, meal, macros)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
async fn delete_weighing(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if repo::delete(&state.db, user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

/// Daily progress: a storage failure fails the whole call, a missing
/// profile silently falls back to the default targets.
#[instrument(skip(state))]
async fn daily(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<DailySummary>, AppError> {
    let date = q.date.unwrap_or_else(today);
    let events = repo::list_for_date(&state.db, user_id, date).await?;
    let targets = targets::repo::get_targets(&state.db, user_id)
        .await?
        .unwrap_or(DEFAULT_TARGETS);
    Ok(Json(summary::daily_summary(date, &events, targets)))
}

#[instrument(skip(state))]
async fn range(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Vec<NutritionDay>>, AppError> {
    let last = today();
    let first = q.window.first_date(last);
    let events = repo::list_in_range(&state.db, user_id, first, last).await?;
    Ok(Json(summary::nutrition_range(last, q.window, &events)))
}
