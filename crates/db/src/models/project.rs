//! Project entity model and DTOs.

use atelier_core::requirements::Requirements;
use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `internal_notes` is not client-visible -- responses to clients and
/// collaborators must go through [`Project::redacted`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub request_id: Option<DbId>,
    pub client_id: DbId,
    pub developer_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub status_id: i16,
    pub priority: i32,
    pub budget_cents: Option<i64>,
    pub paid_cents: i64,
    pub progress_percent: i32,
    pub start_date: Option<NaiveDate>,
    pub estimated_completion_date: Option<NaiveDate>,
    pub actual_completion_date: Option<NaiveDate>,
    pub tech_stack: Vec<String>,
    pub repository_url: Option<String>,
    pub staging_url: Option<String>,
    pub live_url: Option<String>,
    pub internal_notes: Option<String>,
    pub requirements: Json<Requirements>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Copy of the row with internal notes stripped, for client-facing
    /// responses.
    pub fn redacted(mut self) -> Self {
        self.internal_notes = None;
        self
    }
}

/// DTO for direct admin project creation (no originating request).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: DbId,
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub budget_cents: Option<i64>,
    pub priority: Option<i32>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub estimated_completion_date: Option<NaiveDate>,
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub requirements: Requirements,
}

/// DTO for project field updates. All fields are optional.
///
/// Admins may apply any field; assigned developers are restricted to the
/// URL fields by the handler (status and progress go through status
/// updates, never through this DTO).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub budget_cents: Option<i64>,
    pub paid_cents: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub estimated_completion_date: Option<NaiveDate>,
    pub actual_completion_date: Option<NaiveDate>,
    pub tech_stack: Option<Vec<String>>,
    pub repository_url: Option<String>,
    pub staging_url: Option<String>,
    pub live_url: Option<String>,
    pub internal_notes: Option<String>,
}

impl UpdateProject {
    /// True if every field outside the developer-editable set is `None`.
    ///
    /// Assigned developers may update delivery URLs only; everything else
    /// is admin territory.
    pub fn is_developer_scoped(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.budget_cents.is_none()
            && self.paid_cents.is_none()
            && self.start_date.is_none()
            && self.estimated_completion_date.is_none()
            && self.actual_completion_date.is_none()
            && self.tech_stack.is_none()
            && self.internal_notes.is_none()
    }
}
