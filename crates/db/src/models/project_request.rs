//! Project request entity model and DTOs.

use atelier_core::requirements::Requirements;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A project request row from the `project_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRequest {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub budget_cents: Option<i64>,
    pub timeline: Option<String>,
    pub requirements: Json<Requirements>,
    pub status_id: i16,
    pub reviewer_id: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a client submission. Title, description and type are required;
/// the handler validates them (and the requirements payload) before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitProjectRequest {
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub budget_cents: Option<i64>,
    pub timeline: Option<String>,
    #[serde(default)]
    pub requirements: Requirements,
}

/// DTO for owner/admin edits while a request is still editable.
/// All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_type: Option<String>,
    pub budget_cents: Option<i64>,
    pub timeline: Option<String>,
    pub requirements: Option<Requirements>,
}

/// Admin-supplied overrides applied to the project created at approval.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalOverrides {
    pub budget_cents: Option<i64>,
    pub priority: Option<i32>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub estimated_completion_date: Option<chrono::NaiveDate>,
    pub internal_notes: Option<String>,
}
