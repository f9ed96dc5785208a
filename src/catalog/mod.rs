mod dto;
pub mod handlers;
pub mod lookup;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub use repo::CatalogRef;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
