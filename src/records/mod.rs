//! Meal records, their optional PFC breakdown and calorie statistics.

use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::record_routes()
}
