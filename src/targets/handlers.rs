use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

use super::calculator::compute_targets;
use super::dto::{PreviewResponse, ProfileInput, ProfileResponse};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(put_profile))
        .route("/profile/preview", post(preview_targets))
}

#[instrument(skip(state))]
async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = repo::get(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(profile.into()))
}

/// Saving a profile recomputes and persists the derived targets; they are
/// never recomputed on read.
#[instrument(skip(state, body))]
async fn put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<ProfileInput>,
) -> Result<Json<ProfileResponse>, AppError> {
    let today = OffsetDateTime::now_utc().date();
    validate(&body, today)?;

    let targets = compute_targets(
        body.sex,
        body.weight_kg,
        body.height_cm,
        body.birth_date,
        body.activity,
        today,
    );
    let profile = repo::upsert(
        &state.db,
        user_id,
        body.sex,
        body.birth_date,
        body.height_cm,
        body.weight_kg,
        body.activity,
        targets,
    )
    .await?;
    Ok(Json(profile.into()))
}

/// Live preview while the user edits the form, before anything is saved.
#[instrument(skip(_state, body))]
async fn preview_targets(
    State(_state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(body): Json<ProfileInput>,
) -> Result<Json<PreviewResponse>, AppError> {
    let today = OffsetDateTime::now_utc().date();
    validate(&body, today)?;
    let targets = compute_targets(
        body.sex,
        body.weight_kg,
        body.height_cm,
        body.birth_date,
        body.activity,
        today,
    );
    Ok(Json(PreviewResponse { targets }))
}

fn validate(body: &ProfileInput, today: time::Date) -> Result<(), AppError> {
    if !(20.0..=400.0).contains(&body.weight_kg) {
        return Err(AppError::validation("weight must be between 20 and 400 kg"));
    }
    if !(100.0..=250.0).contains(&body.height_cm) {
        return Err(AppError::validation(
            "height must be between 100 and 250 cm",
        ));
    }
    if body.birth_date >= today {
        return Err(AppError::validation("birth date must be in the past"));
    }
    Ok(())
}
