pub mod health;
pub mod projects;
pub mod requests;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /requests                                list, submit
/// /requests/{id}                           get, patch
/// /requests/{id}/status                    set status (admin, PUT)
/// /requests/{id}/approve                   approve into project (admin, POST)
/// /requests/{id}/reject                    reject (admin, POST)
///
/// /projects                                list owned-or-collaborated, create (admin)
/// /projects/available                      developer pool (GET)
/// /projects/assigned                       caller's assigned projects (GET)
/// /projects/{id}                           get, update (PUT)
/// /projects/{id}/assign                    claim (developer, POST)
/// /projects/{id}/status-updates            list, record (GET, POST)
/// /projects/{id}/collaborators             list, add (GET, POST)
/// /projects/{id}/collaborators/{user_id}   remove (DELETE)
///
/// /me                                      get, update profile (GET, PUT)
/// /users/{id}/role                         set role (admin, PUT)
/// /users/{id}/dashboard                    assembled dashboard (self only, GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project request intake and triage.
        .nest("/requests", requests::router())
        // Projects, claims, status updates, collaborators.
        .nest("/projects", projects::router())
        // Current-user profile.
        .nest("/me", users::me_router())
        // Role management and dashboards.
        .nest("/users", users::router())
}
