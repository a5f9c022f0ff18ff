//! Pure domain logic for the atelier platform.
//!
//! This crate has no I/O dependencies. It defines the role model, the
//! authorization policy, the request/project state machines, and the
//! validated boundary types shared by the persistence and HTTP layers.

pub mod error;
pub mod policy;
pub mod project_type;
pub mod requirements;
pub mod roles;
pub mod status;
pub mod types;
