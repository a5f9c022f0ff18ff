//! Handlers for the current user's profile and admin role management.

use atelier_core::error::CoreError;
use atelier_core::roles::Role;
use atelier_core::types::DbId;
use atelier_db::models::user::{UpdateProfile, User, UserResponse};
use atelier_db::repositories::UserRepo;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let record = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(to_response(record)?))
}

/// PUT /api/v1/me
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    if let Some(email) = &input.email {
        if !email.contains('@') {
            return Err(CoreError::Validation("invalid email address".into()).into());
        }
    }
    if let Some(name) = &input.display_name {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("display_name must not be empty".into()).into());
        }
    }

    let record = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(to_response(record)?))
}

/// Body for `PUT /api/v1/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetUserRole {
    /// Role name (`"client"`, `"developer"`, `"admin"`, `"super_admin"`).
    pub role: String,
}

/// PUT /api/v1/users/{id}/role
///
/// Admin-only. Self-demotion is rejected so the last admin cannot lock
/// everyone out.
pub async fn set_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetUserRole>,
) -> AppResult<Json<UserResponse>> {
    let role = Role::parse(&input.role).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "unknown role '{}'",
            input.role
        )))
    })?;
    if id == admin.user_id && !role.is_admin() {
        return Err(CoreError::Validation("admins cannot demote themselves".into()).into());
    }

    let record = UserRepo::set_role(&state.pool, id, role.id())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    tracing::info!(user_id = id, role = %role, changed_by = admin.user_id, "user role changed");
    Ok(Json(to_response(record)?))
}

fn to_response(user: User) -> Result<UserResponse, AppError> {
    let role = Role::from_id(user.role_id).ok_or_else(|| {
        AppError::InternalError(format!("user {} has unknown role id", user.id))
    })?;
    Ok(UserResponse {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
        role: role.as_str().to_string(),
        created_at: user.created_at,
    })
}
