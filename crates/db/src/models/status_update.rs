//! Status update audit entries.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An immutable audit row from the `status_updates` table. Exactly one is
/// appended per successful project status transition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusUpdate {
    pub id: DbId,
    pub project_id: DbId,
    pub old_status_id: i16,
    pub new_status_id: i16,
    pub progress_percent: i32,
    pub message: String,
    pub client_visible: bool,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for recording a project status transition.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordStatusUpdate {
    /// Target status name (e.g. `"in_testing"`).
    pub new_status: String,
    pub progress_percent: i32,
    pub message: String,
    /// Defaults to visible; developers may hide purely internal notes.
    pub client_visible: Option<bool>,
}
