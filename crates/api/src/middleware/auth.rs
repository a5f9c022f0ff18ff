//! Authentication extractor for Axum handlers.
//!
//! The identity provider signs access tokens; this extractor validates the
//! bearer token and resolves the internal user record. The user row is
//! upserted by external-identity reference, so the first authenticated
//! call a user ever makes creates their account (role defaults to client).

use atelier_core::error::CoreError;
use atelier_core::policy::Principal;
use atelier_core::roles::Role;
use atelier_core::types::DbId;
use atelier_db::models::user::UpsertUser;
use atelier_db::repositories::UserRepo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a Bearer token in the `Authorization`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's resolved role.
    pub role: Role,
}

impl AuthUser {
    /// The principal handed to the authorization policy.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            role: self.role,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // Principal Directory: resolve (or create) the internal user row
        // keyed on the provider's subject.
        let user = UserRepo::upsert(
            &state.pool,
            &UpsertUser {
                external_id: claims.sub,
                email: claims.email,
                display_name: claims.name,
            },
        )
        .await?;

        let role = Role::from_id(user.role_id).ok_or_else(|| {
            AppError::InternalError(format!("user {} has unknown role id", user.id))
        })?;

        Ok(AuthUser {
            user_id: user.id,
            role,
        })
    }
}
