use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{dashboard, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// PUT /{id}/role        -> set_role (admin)
/// GET /{id}/dashboard   -> dashboard::get (self only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/role", put(users::set_role))
        .route("/{id}/dashboard", get(dashboard::get))
}

/// Routes mounted at `/me`.
pub fn me_router() -> Router<AppState> {
    Router::new().route("/", get(users::me).put(users::update_me))
}
