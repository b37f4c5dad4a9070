mod dto;
mod handlers;
pub(crate) mod repo;
pub mod rollover;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
