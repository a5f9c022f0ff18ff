//! Project collaborator grants.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A grant row from the `project_collaborators` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collaborator {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role_id: i16,
    pub can_view_files: bool,
    pub can_upload_files: bool,
    pub can_manage_domains: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a collaborator to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCollaborator {
    pub user_id: DbId,
    /// Collaborator role name (`"viewer"`, `"editor"`, `"admin"`).
    /// Defaults to viewer.
    pub role: Option<String>,
    pub can_view_files: Option<bool>,
    pub can_upload_files: Option<bool>,
    pub can_manage_domains: Option<bool>,
}
