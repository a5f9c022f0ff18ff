use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// Mount the `/requests` resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(requests::submit).get(requests::list))
        .route("/{id}", get(requests::get_by_id).patch(requests::update))
        .route("/{id}/status", put(requests::set_status))
        .route("/{id}/approve", post(requests::approve))
        .route("/{id}/reject", post(requests::reject))
}
