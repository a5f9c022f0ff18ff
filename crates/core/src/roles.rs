//! The platform role model.
//!
//! Role names must match the seed data in
//! `20260110000002_create_roles_table.sql`. Role ordering is total:
//! `client < developer < admin < super_admin`. All policy checks treat
//! `admin` and `super_admin` as equivalent ("admin-or-higher").

use serde::{Deserialize, Serialize};

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_DEVELOPER: &str = "developer";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// A user's role. Ordered so that `>=` expresses "at least this privileged".
///
/// Discriminants match the 1-based seed order of the `roles` lookup table.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client = 1,
    Developer = 2,
    Admin = 3,
    SuperAdmin = 4,
}

impl Role {
    /// Return the database role ID.
    pub fn id(self) -> i16 {
        self as i16
    }

    /// Resolve a role from its database ID.
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Role::Client),
            2 => Some(Role::Developer),
            3 => Some(Role::Admin),
            4 => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// The role name as stored in the `roles` table and JWT claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => ROLE_CLIENT,
            Role::Developer => ROLE_DEVELOPER,
            Role::Admin => ROLE_ADMIN,
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }

    /// Parse a role name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            ROLE_CLIENT => Some(Role::Client),
            ROLE_DEVELOPER => Some(Role::Developer),
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_SUPER_ADMIN => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// `admin` and `super_admin` are interchangeable for every policy check.
    pub fn is_admin(self) -> bool {
        self >= Role::Admin
    }

    /// True if this role meets or exceeds `minimum`.
    pub fn at_least(self, minimum: Role) -> bool {
        self >= minimum
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
