pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod diary;
pub mod error;
pub mod nutrients;
pub mod state;
pub mod targets;
pub mod water;
pub mod weight;

pub use app::{build_app, serve};
pub use state::AppState;
