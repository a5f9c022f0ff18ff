//! Dashboard aggregation queries.
//!
//! Composes a principal's visible requests/projects and summary counters.
//! Project visibility here is ownership + collaboration only; the
//! developer-facing pool and assignment lists come from `ProjectRepo` and
//! are attached by the HTTP layer after its role check.

use atelier_core::policy::CollaboratorRole;
use atelier_core::status::{ProjectStatus, RequestStatus, ACTIVE_PROJECT_STATUSES};
use atelier_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::dashboard::{DashboardProject, ProjectSummary};
use crate::models::project::Project;

/// Prefixed project column list for joined queries.
const PROJECT_COLUMNS: &str = "p.id, p.request_id, p.client_id, p.developer_id, p.title, \
                                p.description, p.project_type, p.status_id, p.priority, \
                                p.budget_cents, p.paid_cents, p.progress_percent, p.start_date, \
                                p.estimated_completion_date, p.actual_completion_date, \
                                p.tech_stack, p.repository_url, p.staging_url, p.live_url, \
                                p.internal_notes, p.requirements, p.created_at, p.updated_at";

/// A collaborated project row carrying the grant's role.
#[derive(Debug, FromRow)]
struct CollaboratedRow {
    collaborator_role_id: i16,
    #[sqlx(flatten)]
    project: Project,
}

/// Provides dashboard aggregation reads.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Summary counters for one user: owned-or-collaborated projects
    /// (distinct) and owned requests.
    pub async fn summary(pool: &PgPool, user_id: DbId) -> Result<ProjectSummary, sqlx::Error> {
        let requested = RequestStatus::Requested.id();
        let in_review = RequestStatus::InReview.id();
        let completed = ProjectStatus::Completed.id();
        let active = ACTIVE_PROJECT_STATUSES
            .iter()
            .map(|s| s.id().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let query = format!(
            "WITH visible AS ( \
                SELECT DISTINCT p.id, p.status_id FROM projects p \
                LEFT JOIN project_collaborators c \
                    ON c.project_id = p.id AND c.user_id = $1 \
                WHERE p.client_id = $1 OR c.user_id IS NOT NULL \
             ) \
             SELECT \
                (SELECT COUNT(*) FROM visible) AS total_projects, \
                (SELECT COUNT(*) FROM visible \
                    WHERE status_id IN ({active})) AS active_projects, \
                (SELECT COUNT(*) FROM visible WHERE status_id = {completed}) AS completed_projects, \
                COUNT(*) AS total_requests, \
                COUNT(*) FILTER (WHERE status_id = {requested}) AS pending_requests, \
                COUNT(*) FILTER (WHERE status_id = {in_review}) AS in_review_requests \
             FROM project_requests WHERE client_id = $1"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Owned-or-collaborated projects, deduplicated by highest-ranked
    /// relationship (client outranks any collaborator grant; a user holds
    /// at most one grant per project), newest first.
    pub async fn owned_or_collaborated(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DashboardProject>, sqlx::Error> {
        let owned_query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.client_id = $1"
        );
        let owned = sqlx::query_as::<_, Project>(&owned_query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let collab_query = format!(
            "SELECT c.role_id AS collaborator_role_id, {PROJECT_COLUMNS} \
             FROM projects p \
             JOIN project_collaborators c ON c.project_id = p.id \
             WHERE c.user_id = $1"
        );
        let collaborated = sqlx::query_as::<_, CollaboratedRow>(&collab_query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let mut entries: Vec<DashboardProject> = owned
            .into_iter()
            .map(|project| DashboardProject {
                relationship: "client",
                project,
            })
            .collect();

        for row in collaborated {
            // Ownership outranks the grant; skip duplicates.
            if row.project.client_id == user_id {
                continue;
            }
            let relationship = CollaboratorRole::from_id(row.collaborator_role_id)
                .map(CollaboratorRole::as_str)
                .unwrap_or("viewer");
            entries.push(DashboardProject {
                relationship,
                project: row.project,
            });
        }

        entries.sort_by(|a, b| b.project.created_at.cmp(&a.project.created_at));
        Ok(entries)
    }
}
