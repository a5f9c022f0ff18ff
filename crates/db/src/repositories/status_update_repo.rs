//! Read-side repository for the append-only `status_updates` table.
//!
//! Inserts happen exclusively inside
//! [`ProjectRepo::record_status_update`](crate::repositories::ProjectRepo::record_status_update)
//! so the audit row and the project fields can never diverge.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::status_update::StatusUpdate;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, old_status_id, new_status_id, progress_percent, \
                        message, client_visible, author_id, created_at";

/// Provides read access to status update history.
pub struct StatusUpdateRepo;

impl StatusUpdateRepo {
    /// Full history for a project, oldest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<StatusUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM status_updates WHERE project_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, StatusUpdate>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Client-visible history only, for client and collaborator readers.
    pub async fn list_client_visible(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<StatusUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM status_updates \
             WHERE project_id = $1 AND client_visible \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, StatusUpdate>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent update for a project, if any.
    pub async fn latest_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<StatusUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM status_updates \
             WHERE project_id = $1 ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, StatusUpdate>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
