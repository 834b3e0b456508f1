//! Daily advice: one generated text per user and local day.

use crate::state::AppState;
use axum::Router;

pub mod dto;
mod generator;
pub mod handlers;
pub mod repo;
mod repo_types;
pub mod services;

pub use generator::{AdviceGenerator, DailyIntake, RuleBasedAdvisor};

pub fn router() -> Router<AppState> {
    handlers::advice_routes()
}
