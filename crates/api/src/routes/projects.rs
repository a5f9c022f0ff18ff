//! Route definitions for the `/projects` resource.
//!
//! Also nests collaborator and status-update routes under
//! `/projects/{id}/...`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{collaborators, projects};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                               -> list (owned or collaborated)
/// POST   /                               -> create (admin)
/// GET    /available                      -> list_available (developer)
/// GET    /assigned                       -> list_assigned (developer)
/// GET    /{id}                           -> get_by_id
/// PUT    /{id}                           -> update
/// POST   /{id}/assign                    -> assign (developer)
///
/// GET    /{id}/status-updates            -> list_status_updates
/// POST   /{id}/status-updates            -> record_status_update
///
/// GET    /{id}/collaborators             -> list
/// POST   /{id}/collaborators             -> add
/// DELETE /{id}/collaborators/{user_id}   -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        // Literal segments before the `{id}` capture.
        .route("/available", get(projects::list_available))
        .route("/assigned", get(projects::list_assigned))
        .route("/{id}", get(projects::get_by_id).put(projects::update))
        .route("/{id}/assign", post(projects::assign))
        .route(
            "/{id}/status-updates",
            get(projects::list_status_updates).post(projects::record_status_update),
        )
        .route(
            "/{id}/collaborators",
            get(collaborators::list).post(collaborators::add),
        )
        .route(
            "/{id}/collaborators/{user_id}",
            delete(collaborators::remove),
        )
}
