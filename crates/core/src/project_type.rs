//! Project-type tag constants and validation.
//!
//! Must match the marketing site's service catalogue; requests and projects
//! carry exactly one of these tags.

pub const TYPE_WEBSITE: &str = "website";
pub const TYPE_WEB_APP: &str = "web_app";
pub const TYPE_ECOMMERCE: &str = "ecommerce";
pub const TYPE_MAINTENANCE: &str = "maintenance";
pub const TYPE_CONSULTING: &str = "consulting";

/// All valid project-type tags.
pub const VALID_PROJECT_TYPES: &[&str] = &[
    TYPE_WEBSITE,
    TYPE_WEB_APP,
    TYPE_ECOMMERCE,
    TYPE_MAINTENANCE,
    TYPE_CONSULTING,
];

/// Validate that a project-type tag is one of the accepted values.
pub fn validate_project_type(project_type: &str) -> Result<(), String> {
    if VALID_PROJECT_TYPES.contains(&project_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid project type '{project_type}'. Must be one of: {}",
            VALID_PROJECT_TYPES.join(", ")
        ))
    }
}
