//! Handlers for project collaborator grants.

use atelier_core::error::CoreError;
use atelier_core::policy::{self, CollaboratorRole};
use atelier_core::types::DbId;
use atelier_db::models::collaborator::{AddCollaborator, Collaborator};
use atelier_db::repositories::{CollaboratorRepo, UserRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::fetch_with_access;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/collaborators
///
/// Owner-or-admin. Re-adding an existing collaborator updates the grant.
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<AddCollaborator>,
) -> AppResult<(StatusCode, Json<Collaborator>)> {
    let (_, access) = fetch_with_access(&state, &user, project_id).await?;
    if !policy::can_manage_collaborators(&user.principal(), &access) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }

    let role = match &input.role {
        Some(name) => CollaboratorRole::parse(name).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "unknown collaborator role '{name}'"
            )))
        })?,
        None => CollaboratorRole::Viewer,
    };

    // The grant target must exist; a dangling user id is a 404, not a
    // foreign key error.
    if UserRepo::find_by_id(&state.pool, input.user_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }
        .into());
    }

    let collaborator = CollaboratorRepo::add(&state.pool, project_id, role, &input).await?;
    tracing::info!(
        project_id,
        collaborator_id = input.user_id,
        role = role.as_str(),
        granted_by = user.user_id,
        "collaborator added"
    );
    Ok((StatusCode::CREATED, Json(collaborator)))
}

/// DELETE /api/v1/projects/{id}/collaborators/{user_id}
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, target_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let (_, access) = fetch_with_access(&state, &user, project_id).await?;
    if !policy::can_manage_collaborators(&user.principal(), &access) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }

    if CollaboratorRepo::remove(&state.pool, project_id, target_id).await? {
        tracing::info!(project_id, collaborator_id = target_id, revoked_by = user.user_id, "collaborator removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Collaborator",
            id: target_id,
        }
        .into())
    }
}

/// GET /api/v1/projects/{id}/collaborators
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Collaborator>>> {
    let (_, access) = fetch_with_access(&state, &user, project_id).await?;
    if !policy::can_read_project(&user.principal(), &access) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }
    let collaborators = CollaboratorRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(collaborators))
}
