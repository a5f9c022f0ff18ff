//! HTTP handlers, grouped by resource.

pub mod collaborators;
pub mod dashboard;
pub mod projects;
pub mod requests;
pub mod users;
