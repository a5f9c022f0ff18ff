//! Dashboard handler.
//!
//! Assembles one principal's full dashboard in a single response: their
//! requests, their owned-or-collaborated projects, summary counters and,
//! for developers, the available pool and their assigned work.

use atelier_core::policy;
use atelier_core::roles::Role;
use atelier_core::types::DbId;
use atelier_db::models::dashboard::Dashboard;
use atelier_db::repositories::{DashboardRepo, ProjectRepo, ProjectRequestRepo};
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users/{id}/dashboard
///
/// Strictly self-service: admins do not read other users' dashboards
/// through this endpoint.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Dashboard>> {
    policy::require_self(&user.principal(), id)?;

    let requests = ProjectRequestRepo::list_by_client(&state.pool, id).await?;
    let mut projects = DashboardRepo::owned_or_collaborated(&state.pool, id).await?;
    let summary = DashboardRepo::summary(&state.pool, id).await?;

    // Clients and collaborators never see internal notes, even on their
    // own dashboard.
    if !user.role.is_admin() {
        for entry in &mut projects {
            if entry.project.developer_id != Some(id) {
                entry.project.internal_notes = None;
            }
        }
    }

    let (available_projects, assigned_projects) = if user.role.at_least(Role::Developer) {
        let mut available = ProjectRepo::list_available(&state.pool).await?;
        if !user.role.is_admin() {
            for project in &mut available {
                project.internal_notes = None;
            }
        }
        let assigned = ProjectRepo::list_by_developer(&state.pool, id).await?;
        (available, assigned)
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(Json(Dashboard {
        user_id: id,
        requests,
        projects,
        summary,
        available_projects,
        assigned_projects,
    }))
}
