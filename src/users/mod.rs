pub mod age;
mod dto;
pub mod filter;
pub mod handlers;
pub mod pagination;
mod repo;
mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::user_routes())
}
