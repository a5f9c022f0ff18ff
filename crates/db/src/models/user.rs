//! User entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// `external_id` is the identity provider's stable subject; it is an
/// implementation detail of the auth layer and never serialized to API
/// responses (use [`UserResponse`]).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub external_id: String,
    pub email: String,
    pub display_name: String,
    pub role_id: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// External-facing user representation.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    /// Resolved role name (e.g. `"client"`, `"developer"`).
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for the first-sign-in upsert keyed on `external_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertUser {
    pub external_id: String,
    pub email: String,
    pub display_name: String,
}

/// DTO for profile edits. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub email: Option<String>,
    pub display_name: Option<String>,
}
