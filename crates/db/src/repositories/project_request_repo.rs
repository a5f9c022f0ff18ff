//! Repository for the `project_requests` table.
//!
//! Status transitions are conditional UPDATEs guarded on the expected
//! current status, so concurrent admin actions resolve to exactly one
//! winner; a `None` return means the guard failed and the caller should
//! surface a conflict.

use atelier_core::status::{ProjectStatus, RequestStatus};
use atelier_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::Project;
use crate::models::project_request::{
    ApprovalOverrides, ProjectRequest, SubmitProjectRequest, UpdateProjectRequest,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, title, description, project_type, budget_cents, \
                        timeline, requirements, status_id, reviewer_id, reviewed_at, \
                        created_at, updated_at";

/// Column list for the project row created at approval.
const PROJECT_COLUMNS: &str = "id, request_id, client_id, developer_id, title, description, \
                                project_type, status_id, priority, budget_cents, paid_cents, \
                                progress_percent, start_date, estimated_completion_date, \
                                actual_completion_date, tech_stack, repository_url, staging_url, \
                                live_url, internal_notes, requirements, created_at, updated_at";

/// Provides operations for project requests.
pub struct ProjectRequestRepo;

impl ProjectRequestRepo {
    /// Insert a new request in `requested` status, returning the created row.
    pub async fn submit(
        pool: &PgPool,
        client_id: DbId,
        input: &SubmitProjectRequest,
    ) -> Result<ProjectRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_requests \
                (client_id, title, description, project_type, budget_cents, timeline, requirements, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.project_type)
            .bind(input.budget_cents)
            .bind(&input.timeline)
            .bind(Json(&input.requirements))
            .bind(RequestStatus::Requested.id())
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_requests WHERE id = $1");
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a client's own requests, newest first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_requests WHERE client_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// List all requests, newest first. Admin triage view.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProjectRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_requests ORDER BY created_at DESC");
        sqlx::query_as::<_, ProjectRequest>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update request fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The caller has
    /// already checked editability via the policy.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProjectRequest,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE project_requests SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                project_type = COALESCE($4, project_type), \
                budget_cents = COALESCE($5, budget_cents), \
                timeline = COALESCE($6, timeline), \
                requirements = COALESCE($7, requirements) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.project_type)
            .bind(input.budget_cents)
            .bind(&input.timeline)
            .bind(input.requirements.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Transition a request from `from` to `to`, stamping the reviewer.
    ///
    /// The UPDATE is guarded on `status_id = from`; `None` means another
    /// actor moved the request first (or the id does not exist) and the
    /// caller should re-fetch.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: RequestStatus,
        to: RequestStatus,
        reviewer_id: DbId,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE project_requests \
             SET status_id = $2, reviewer_id = $3, reviewed_at = NOW() \
             WHERE id = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(id)
            .bind(to.id())
            .bind(reviewer_id)
            .bind(from.id())
            .fetch_optional(pool)
            .await
    }

    /// Approve a request and create its project as one atomic unit.
    ///
    /// Inside a single transaction:
    /// 1. conditionally mark the request `approved`, guarded on
    ///    `status_id = in_review` -- zero rows means another admin already
    ///    acted, and the whole operation aborts with `Ok(None)`;
    /// 2. insert the project, copying the request's client, title,
    ///    description, type and requirements, applying admin overrides.
    ///
    /// A failure in step 2 rolls back step 1, so an `approved` request
    /// without a project can never be observed.
    pub async fn approve_into_project(
        pool: &PgPool,
        request_id: DbId,
        reviewer_id: DbId,
        overrides: &ApprovalOverrides,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let guard = format!(
            "UPDATE project_requests \
             SET status_id = $2, reviewer_id = $3, reviewed_at = NOW() \
             WHERE id = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, ProjectRequest>(&guard)
            .bind(request_id)
            .bind(RequestStatus::Approved.id())
            .bind(reviewer_id)
            .bind(RequestStatus::InReview.id())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = request else {
            tx.rollback().await?;
            return Ok(None);
        };

        let insert = format!(
            "INSERT INTO projects \
                (request_id, client_id, title, description, project_type, status_id, \
                 priority, budget_cents, tech_stack, start_date, estimated_completion_date, \
                 internal_notes, requirements) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {PROJECT_COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&insert)
            .bind(request.id)
            .bind(request.client_id)
            .bind(&request.title)
            .bind(&request.description)
            .bind(&request.project_type)
            .bind(ProjectStatus::Approved.id())
            .bind(overrides.priority.unwrap_or(0))
            .bind(overrides.budget_cents.or(request.budget_cents))
            .bind(&overrides.tech_stack)
            .bind(overrides.start_date)
            .bind(overrides.estimated_completion_date)
            .bind(&overrides.internal_notes)
            .bind(&request.requirements)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }
}
