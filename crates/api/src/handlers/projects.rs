//! Handlers for the `/projects` resource.
//!
//! Every handler resolves the project's ownership facts (client, assigned
//! developer, the caller's collaborator grant) and routes the decision
//! through the authorization policy before touching anything else.

use atelier_core::error::CoreError;
use atelier_core::policy::{self, CollaboratorRole, ProjectAccess};
use atelier_core::project_type::validate_project_type;
use atelier_core::status::ProjectStatus;
use atelier_core::types::DbId;
use atelier_db::models::project::{CreateProject, Project, UpdateProject};
use atelier_db::models::status_update::{RecordStatusUpdate, StatusUpdate};
use atelier_db::repositories::{CollaboratorRepo, ProjectRepo, StatusUpdateRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireDeveloper};
use crate::state::AppState;

/// POST /api/v1/projects
///
/// Direct admin creation, bypassing the request pipeline. The project
/// starts in `approved`, ready for claiming.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("title is required".into()).into());
    }
    if input.description.trim().is_empty() {
        return Err(CoreError::Validation("description is required".into()).into());
    }
    validate_project_type(&input.project_type).map_err(CoreError::Validation)?;
    input
        .requirements
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, client_id = project.client_id, created_by = admin.user_id, "project created directly");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let (project, access) = fetch_with_access(&state, &user, id).await?;
    if !policy::can_read_project(&user.principal(), &access) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }
    Ok(Json(visible(project, &user, &access)))
}

/// GET /api/v1/projects -- the caller's owned-or-collaborated projects.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<atelier_db::models::dashboard::DashboardProject>>> {
    let mut entries =
        atelier_db::repositories::DashboardRepo::owned_or_collaborated(&state.pool, user.user_id)
            .await?;
    if !user.role.is_admin() {
        for entry in &mut entries {
            if entry.project.developer_id != Some(user.user_id) {
                entry.project.internal_notes = None;
            }
        }
    }
    Ok(Json(entries))
}

/// GET /api/v1/projects/available -- the developer pool.
pub async fn list_available(
    State(state): State<AppState>,
    RequireDeveloper(dev): RequireDeveloper,
) -> AppResult<Json<Vec<Project>>> {
    let mut projects = ProjectRepo::list_available(&state.pool).await?;
    if !dev.role.is_admin() {
        for project in &mut projects {
            project.internal_notes = None;
        }
    }
    Ok(Json(projects))
}

/// GET /api/v1/projects/assigned -- the caller's assigned projects.
pub async fn list_assigned(
    State(state): State<AppState>,
    RequireDeveloper(dev): RequireDeveloper,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_developer(&state.pool, dev.user_id).await?;
    Ok(Json(projects))
}

/// PUT /api/v1/projects/{id}
///
/// Admins may set any field; the assigned developer is limited to the
/// delivery URL fields.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let (_, access) = fetch_with_access(&state, &user, id).await?;
    if !policy::can_mutate_project(&user.principal(), &access) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }
    if !user.role.is_admin() && !input.is_developer_scoped() {
        return Err(CoreError::Forbidden(
            "developers may update delivery URLs only".into(),
        )
        .into());
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(visible(project, &user, &access)))
}

/// POST /api/v1/projects/{id}/assign
///
/// The claim: one conditional UPDATE decides the winner. A lost race (or
/// an ineligible project) is a 409, not a retry.
pub async fn assign(
    State(state): State<AppState>,
    RequireDeveloper(dev): RequireDeveloper,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    match ProjectRepo::assign(&state.pool, id, dev.user_id).await? {
        Some(project) => {
            tracing::info!(project_id = id, developer_id = dev.user_id, "project claimed");
            Ok(Json(project))
        }
        None => {
            // Distinguish a missing project from a lost claim.
            match ProjectRepo::find_by_id(&state.pool, id).await? {
                None => Err(CoreError::NotFound {
                    entity: "Project",
                    id,
                }
                .into()),
                Some(_) => Err(CoreError::Conflict(
                    "project already assigned or not assignable".into(),
                )
                .into()),
            }
        }
    }
}

/// POST /api/v1/projects/{id}/status-updates
pub async fn record_status_update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<RecordStatusUpdate>,
) -> AppResult<(StatusCode, Json<StatusUpdate>)> {
    let (project, access) = fetch_with_access(&state, &user, id).await?;
    if !policy::can_record_status_update(&user.principal(), &access) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }

    let new = ProjectStatus::parse(&input.new_status).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "unknown project status '{}'",
            input.new_status
        )))
    })?;
    if !(0..=100).contains(&input.progress_percent) {
        return Err(CoreError::Validation("progress_percent must be 0-100".into()).into());
    }
    let old = project_status(&project)?;
    if !old.can_transition(new) {
        return Err(CoreError::InvalidTransition {
            entity: "Project",
            from: old.as_str(),
            to: new.as_str(),
        }
        .into());
    }

    let (_, entry) = ProjectRepo::record_status_update(
        &state.pool,
        id,
        old,
        new,
        input.progress_percent,
        &input.message,
        input.client_visible.unwrap_or(true),
        user.user_id,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "project status changed concurrently".into(),
        ))
    })?;
    tracing::info!(project_id = id, from = %old, to = %new, author_id = user.user_id, "status update recorded");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/projects/{id}/status-updates
///
/// Clients and collaborators see only client-visible entries; admins and
/// the assigned developer see everything.
pub async fn list_status_updates(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<StatusUpdate>>> {
    let (_, access) = fetch_with_access(&state, &user, id).await?;
    if !policy::can_read_project(&user.principal(), &access) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }

    let updates = if policy::can_view_internal_notes(&user.principal(), &access) {
        StatusUpdateRepo::list_for_project(&state.pool, id).await?
    } else {
        StatusUpdateRepo::list_client_visible(&state.pool, id).await?
    };
    Ok(Json(updates))
}

/// Fetch a project plus the caller's ownership facts.
pub(crate) async fn fetch_with_access(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> Result<(Project, ProjectAccess), AppError> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let collaborator = CollaboratorRepo::find(&state.pool, id, user.user_id).await?;
    let collaborator_role = collaborator.and_then(|c| CollaboratorRole::from_id(c.role_id));
    let status = project_status(&project)?;
    let access = ProjectAccess {
        client_id: project.client_id,
        developer_id: project.developer_id,
        status,
        collaborator_role,
    };
    Ok((project, access))
}

fn project_status(project: &Project) -> Result<ProjectStatus, AppError> {
    ProjectStatus::from_id(project.status_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "project {} has unknown status id {}",
            project.id, project.status_id
        ))
    })
}

/// Strip internal notes for callers without internal visibility.
fn visible(project: Project, user: &AuthUser, access: &ProjectAccess) -> Project {
    if policy::can_view_internal_notes(&user.principal(), access) {
        project
    } else {
        project.redacted()
    }
}
