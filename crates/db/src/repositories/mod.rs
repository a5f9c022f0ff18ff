//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-row mutations (approval,
//! status transitions) run inside a single transaction; claim-style writes
//! are single conditional UPDATEs whose `None` result signals a lost race.

pub mod collaborator_repo;
pub mod dashboard_repo;
pub mod project_repo;
pub mod project_request_repo;
pub mod status_update_repo;
pub mod user_repo;

pub use collaborator_repo::CollaboratorRepo;
pub use dashboard_repo::DashboardRepo;
pub use project_repo::ProjectRepo;
pub use project_request_repo::ProjectRequestRepo;
pub use status_update_repo::StatusUpdateRepo;
pub use user_repo::UserRepo;
