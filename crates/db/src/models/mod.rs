//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod collaborator;
pub mod dashboard;
pub mod project;
pub mod project_request;
pub mod status_update;
pub mod user;
