//! Repository for the `projects` table.
//!
//! Assignment is the only concurrency-sensitive write in the system: it is
//! a single conditional UPDATE whose predicate and write the store
//! evaluates atomically, so exactly one of N concurrent claimants wins and
//! the rest observe zero affected rows. No application-level locking.

use atelier_core::status::ProjectStatus;
use atelier_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::status_update::StatusUpdate;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, request_id, client_id, developer_id, title, description, \
                        project_type, status_id, priority, budget_cents, paid_cents, \
                        progress_percent, start_date, estimated_completion_date, \
                        actual_completion_date, tech_stack, repository_url, staging_url, \
                        live_url, internal_notes, requirements, created_at, updated_at";

/// Column list for `status_updates` rows.
const UPDATE_COLUMNS: &str = "id, project_id, old_status_id, new_status_id, progress_percent, \
                               message, client_visible, author_id, created_at";

/// Provides operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project directly (admin path, no originating request).
    /// Starts in `approved` status with progress 0, ready for claiming.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects \
                (client_id, title, description, project_type, status_id, priority, \
                 budget_cents, tech_stack, start_date, estimated_completion_date, \
                 internal_notes, requirements) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.project_type)
            .bind(ProjectStatus::Approved.id())
            .bind(input.priority.unwrap_or(0))
            .bind(input.budget_cents)
            .bind(&input.tech_stack)
            .bind(input.start_date)
            .bind(input.estimated_completion_date)
            .bind(&input.internal_notes)
            .bind(Json(&input.requirements))
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The available pool: approved, unassigned projects, oldest first so
    /// long-waiting work surfaces at the top.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE status_id = $1 AND developer_id IS NULL \
             ORDER BY priority DESC, created_at ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Approved.id())
            .fetch_all(pool)
            .await
    }

    /// List projects assigned to a developer, newest first.
    pub async fn list_by_developer(
        pool: &PgPool,
        developer_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE developer_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(developer_id)
            .fetch_all(pool)
            .await
    }

    /// Update project fields. Only non-`None` fields in `input` are applied.
    ///
    /// Status and progress are deliberately absent: they change only
    /// through [`ProjectRepo::record_status_update`] and
    /// [`ProjectRepo::assign`].
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                priority = COALESCE($4, priority), \
                budget_cents = COALESCE($5, budget_cents), \
                paid_cents = COALESCE($6, paid_cents), \
                start_date = COALESCE($7, start_date), \
                estimated_completion_date = COALESCE($8, estimated_completion_date), \
                actual_completion_date = COALESCE($9, actual_completion_date), \
                tech_stack = COALESCE($10, tech_stack), \
                repository_url = COALESCE($11, repository_url), \
                staging_url = COALESCE($12, staging_url), \
                live_url = COALESCE($13, live_url), \
                internal_notes = COALESCE($14, internal_notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.budget_cents)
            .bind(input.paid_cents)
            .bind(input.start_date)
            .bind(input.estimated_completion_date)
            .bind(input.actual_completion_date)
            .bind(&input.tech_stack)
            .bind(&input.repository_url)
            .bind(&input.staging_url)
            .bind(&input.live_url)
            .bind(&input.internal_notes)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim an unassigned, approved project for a developer.
    ///
    /// Single conditional UPDATE: the predicate (`approved` and no
    /// developer) and the write are evaluated atomically by the store, so
    /// no further locking is needed. `None` means the project was already
    /// claimed or is not assignable -- a deliberate lost-update rejection,
    /// never retried here.
    pub async fn assign(
        pool: &PgPool,
        project_id: DbId,
        developer_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects \
             SET developer_id = $2, status_id = $3 \
             WHERE id = $1 AND status_id = $4 AND developer_id IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .bind(developer_id)
            .bind(ProjectStatus::InProgress.id())
            .bind(ProjectStatus::Approved.id())
            .fetch_optional(pool)
            .await
    }

    /// Record a status transition: append the audit row and update the
    /// project's status/progress as one transaction.
    ///
    /// The project UPDATE is guarded on `status_id = old`, which both
    /// serializes concurrent transitions (one winner, losers get `None`)
    /// and guarantees the appended `StatusUpdate` captures the true prior
    /// status. Readers never observe one write without the other.
    pub async fn record_status_update(
        pool: &PgPool,
        project_id: DbId,
        old: ProjectStatus,
        new: ProjectStatus,
        progress_percent: i32,
        message: &str,
        client_visible: bool,
        author_id: DbId,
    ) -> Result<Option<(Project, StatusUpdate)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update = format!(
            "UPDATE projects \
             SET status_id = $2, progress_percent = $3 \
             WHERE id = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&update)
            .bind(project_id)
            .bind(new.id())
            .bind(progress_percent)
            .bind(old.id())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            tx.rollback().await?;
            return Ok(None);
        };

        let insert = format!(
            "INSERT INTO status_updates \
                (project_id, old_status_id, new_status_id, progress_percent, message, \
                 client_visible, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {UPDATE_COLUMNS}"
        );
        let entry = sqlx::query_as::<_, StatusUpdate>(&insert)
            .bind(project_id)
            .bind(old.id())
            .bind(new.id())
            .bind(progress_percent)
            .bind(message)
            .bind(client_visible)
            .bind(author_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((project, entry)))
    }
}
