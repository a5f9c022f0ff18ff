//! Dashboard read models.

use atelier_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::project::Project;
use crate::models::project_request::ProjectRequest;

/// Aggregate counters for a principal's dashboard.
///
/// "Active" counts projects in `in_progress`, `in_testing` or
/// `ready_for_launch`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
    pub total_requests: i64,
    pub pending_requests: i64,
    pub in_review_requests: i64,
}

/// A project on a user's dashboard, tagged with how the user relates to it.
///
/// When a user is both the owning client and a collaborator, the
/// highest-ranked relationship wins: `client` outranks every collaborator
/// role, then `admin` > `editor` > `viewer`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardProject {
    /// `"client"`, `"admin"`, `"editor"` or `"viewer"`.
    pub relationship: &'static str,
    #[serde(flatten)]
    pub project: Project,
}

/// The assembled dashboard for one principal.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user_id: DbId,
    pub requests: Vec<ProjectRequest>,
    pub projects: Vec<DashboardProject>,
    pub summary: ProjectSummary,
    /// Approved, unassigned projects. Empty for non-developer principals.
    pub available_projects: Vec<Project>,
    /// Projects assigned to this principal. Empty for non-developer
    /// principals.
    pub assigned_projects: Vec<Project>,
}
