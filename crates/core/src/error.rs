use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every fallible operation in the core raises one of these at the point of
/// detection and propagates it unmodified; there is no silent recovery.
/// `Conflict` is the one variant callers are expected to treat as routine
/// (re-fetch and re-decide) -- it signals an optimistic precondition that
/// another actor invalidated first.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid transition for {entity}: {from} -> {to}")]
    InvalidTransition {
        entity: &'static str,
        from: &'static str,
        to: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
