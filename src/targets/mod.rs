pub mod calculator;
mod dto;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub use calculator::{Targets, DEFAULT_TARGETS};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
