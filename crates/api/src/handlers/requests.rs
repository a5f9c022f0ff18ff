//! Handlers for the `/requests` resource (project requests).

use atelier_core::error::CoreError;
use atelier_core::policy;
use atelier_core::project_type::validate_project_type;
use atelier_core::status::RequestStatus;
use atelier_core::types::DbId;
use atelier_db::models::project::Project;
use atelier_db::models::project_request::{
    ApprovalOverrides, ProjectRequest, SubmitProjectRequest, UpdateProjectRequest,
};
use atelier_db::repositories::ProjectRequestRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/requests
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SubmitProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectRequest>)> {
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

    let request = ProjectRequestRepo::submit(&state.pool, user.user_id, &input).await?;
    tracing::info!(request_id = request.id, client_id = user.user_id, "project request submitted");
    Ok((StatusCode::CREATED, Json(request)))
}

/// Query parameters for `GET /api/v1/requests`.
#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    /// Admin triage view across all clients.
    #[serde(default)]
    pub all: bool,
}

/// GET /api/v1/requests
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListRequestsQuery>,
) -> AppResult<Json<Vec<ProjectRequest>>> {
    let requests = if query.all {
        policy::require_admin(&user.principal())?;
        ProjectRequestRepo::list_all(&state.pool).await?
    } else {
        ProjectRequestRepo::list_by_client(&state.pool, user.user_id).await?
    };
    Ok(Json(requests))
}

/// GET /api/v1/requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectRequest>> {
    let request = fetch_request(&state, id).await?;
    if !policy::can_read_request(&user.principal(), request.client_id) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }
    Ok(Json(request))
}

/// PATCH /api/v1/requests/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectRequest>> {
    let request = fetch_request(&state, id).await?;
    let status = request_status(&request)?;
    if !policy::can_mutate_request(&user.principal(), request.client_id, status) {
        return Err(CoreError::Forbidden("Insufficient permissions".into()).into());
    }
    if let Some(project_type) = &input.project_type {
        validate_project_type(project_type).map_err(CoreError::Validation)?;
    }
    if let Some(requirements) = &input.requirements {
        requirements
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
    }

    let updated = ProjectRequestRepo::update_fields(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectRequest",
            id,
        }))?;
    Ok(Json(updated))
}

/// Body for `PUT /api/v1/requests/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetRequestStatus {
    /// Target status name (e.g. `"in_review"`).
    pub status: String,
}

/// PUT /api/v1/requests/{id}/status
///
/// Admin triage transitions. Approval is excluded: it creates a project
/// and must go through the approve endpoint.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetRequestStatus>,
) -> AppResult<Json<ProjectRequest>> {
    let to = RequestStatus::parse(&input.status).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "unknown request status '{}'",
            input.status
        )))
    })?;
    if to == RequestStatus::Approved {
        return Err(CoreError::Validation(
            "approval must go through the approve endpoint".into(),
        )
        .into());
    }

    let request = fetch_request(&state, id).await?;
    let from = request_status(&request)?;
    if !from.can_transition(to) {
        return Err(CoreError::InvalidTransition {
            entity: "ProjectRequest",
            from: from.as_str(),
            to: to.as_str(),
        }
        .into());
    }

    // Guarded on the status we just read; a concurrent admin action makes
    // this a no-op and surfaces as a conflict.
    let updated = ProjectRequestRepo::set_status(&state.pool, id, from, to, admin.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "request was modified by another admin".into(),
            ))
        })?;
    tracing::info!(request_id = id, from = %from, to = %to, reviewer_id = admin.user_id, "request status changed");
    Ok(Json(updated))
}

/// POST /api/v1/requests/{id}/approve
///
/// Atomically marks the request approved and creates its project. Exactly
/// one of any concurrent approvals wins; the rest receive 409.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(overrides): Json<ApprovalOverrides>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let request = fetch_request(&state, id).await?;
    let from = request_status(&request)?;
    if from != RequestStatus::InReview {
        return Err(CoreError::InvalidTransition {
            entity: "ProjectRequest",
            from: from.as_str(),
            to: RequestStatus::Approved.as_str(),
        }
        .into());
    }

    let project =
        ProjectRequestRepo::approve_into_project(&state.pool, id, admin.user_id, &overrides)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(
                    "request already acted on by another admin".into(),
                ))
            })?;
    tracing::info!(request_id = id, project_id = project.id, reviewer_id = admin.user_id, "request approved into project");
    Ok((StatusCode::CREATED, Json(project)))
}

/// POST /api/v1/requests/{id}/reject
///
/// Sugar for a reviewed transition to `cancelled`.
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectRequest>> {
    let request = fetch_request(&state, id).await?;
    let from = request_status(&request)?;
    if !from.can_transition(RequestStatus::Cancelled) {
        return Err(CoreError::InvalidTransition {
            entity: "ProjectRequest",
            from: from.as_str(),
            to: RequestStatus::Cancelled.as_str(),
        }
        .into());
    }

    let updated = ProjectRequestRepo::set_status(
        &state.pool,
        id,
        from,
        RequestStatus::Cancelled,
        admin.user_id,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "request was modified by another admin".into(),
        ))
    })?;
    tracing::info!(request_id = id, reviewer_id = admin.user_id, "request rejected");
    Ok(Json(updated))
}

async fn fetch_request(state: &AppState, id: DbId) -> Result<ProjectRequest, AppError> {
    ProjectRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectRequest",
            id,
        }))
}

fn request_status(request: &ProjectRequest) -> Result<RequestStatus, AppError> {
    RequestStatus::from_id(request.status_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "request {} has unknown status id {}",
            request.id, request.status_id
        ))
    })
}
