use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

use super::dto::{BarcodeResponse, CatalogItem, CreateUserProduct, SearchQuery, SearchResponse};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/catalog/search", get(search))
        .route("/catalog/barcode/:code", get(barcode))
        .route("/catalog/private", post(create_private))
}

#[instrument(skip(state))]
async fn search(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let term = q.q.trim();
    if term.is_empty() {
        return Err(AppError::validation("query must not be empty"));
    }
    let limit = q.limit.clamp(1, 50);

    let mut items: Vec<CatalogItem> = repo::search_private(&state.db, user_id, term, limit)
        .await?
        .into_iter()
        .map(CatalogItem::from)
        .collect();
    items.extend(
        repo::search_global(&state.db, term, limit)
            .await?
            .into_iter()
            .map(CatalogItem::from),
    );
    items.truncate(limit as usize);

    Ok(Json(SearchResponse { items }))
}

/// Local catalogs first, then the remote database. A remote hit becomes a
/// shared product so the next scan of the same code stays local.
#[instrument(skip(state))]
async fn barcode(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(code): Path<String>,
) -> Result<Json<BarcodeResponse>, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::validation("barcode must not be empty"));
    }

    if let Some(p) = repo::private_by_barcode(&state.db, user_id, code).await? {
        return Ok(Json(found(p.into())));
    }
    if let Some(p) = repo::global_by_barcode(&state.db, code).await? {
        return Ok(Json(found(p.into())));
    }

    let remote = state
        .lookup
        .by_barcode(code)
        .await
        .map_err(AppError::Lookup)?;
    let Some(food) = remote else {
        return Ok(Json(BarcodeResponse {
            found: false,
            item: None,
        }));
    };

    let product = repo::insert_global(
        &state.db,
        &food.name,
        food.brand.as_deref(),
        Some(code),
        &food.per_100g,
        "openfoodfacts",
    )
    .await?;

    Ok(Json(found(product.into())))
}

#[instrument(skip(state, body))]
async fn create_private(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateUserProduct>,
) -> Result<(StatusCode, Json<CatalogItem>), AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name is required"));
    }
    let per = body.per_100g;
    if per.kcal < 0.0 || per.protein < 0.0 || per.carbs < 0.0 || per.fat < 0.0 {
        return Err(AppError::validation("per-100g values must not be negative"));
    }

    let item = repo::insert_private(
        &state.db,
        user_id,
        name,
        body.brand.as_deref(),
        body.barcode.as_deref(),
        &per,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

fn found(item: CatalogItem) -> BarcodeResponse {
    BarcodeResponse {
        found: true,
        item: Some(item),
    }
}
