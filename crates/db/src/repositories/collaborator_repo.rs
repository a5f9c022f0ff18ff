//! Repository for the `project_collaborators` table.

use atelier_core::policy::CollaboratorRole;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::collaborator::{AddCollaborator, Collaborator};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, role_id, can_view_files, can_upload_files, \
                        can_manage_domains, created_at, updated_at";

/// Provides CRUD operations for collaborator grants.
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    /// Grant (or re-grant) a user access to a project.
    ///
    /// One grant per (project, user): re-adding updates the role and
    /// capability flags in place.
    pub async fn add(
        pool: &PgPool,
        project_id: DbId,
        role: CollaboratorRole,
        input: &AddCollaborator,
    ) -> Result<Collaborator, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_collaborators \
                (project_id, user_id, role_id, can_view_files, can_upload_files, can_manage_domains) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (project_id, user_id) DO UPDATE SET \
                role_id = EXCLUDED.role_id, \
                can_view_files = EXCLUDED.can_view_files, \
                can_upload_files = EXCLUDED.can_upload_files, \
                can_manage_domains = EXCLUDED.can_manage_domains \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(project_id)
            .bind(input.user_id)
            .bind(role.id())
            .bind(input.can_view_files.unwrap_or(true))
            .bind(input.can_upload_files.unwrap_or(false))
            .bind(input.can_manage_domains.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Revoke a user's grant. Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_collaborators WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All grants on a project.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Collaborator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_collaborators WHERE project_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// A specific user's grant on a project, if any. Policy checks fetch
    /// this before deciding project visibility.
    pub async fn find(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_collaborators WHERE project_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, Collaborator>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
