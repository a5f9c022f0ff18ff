//! The authorization policy.
//!
//! Every entry point that reads or mutates a request or project must route
//! through these functions; no other module compares roles or ownership.
//! All checks are pure: callers fetch the target's ownership facts first and
//! pass them in. Denials use a deliberately generic message so an
//! unauthorized caller learns nothing about whether the resource exists.

use crate::error::CoreError;
use crate::roles::Role;
use crate::status::ProjectStatus;
use crate::types::DbId;

/// An authenticated caller: internal user id plus resolved role.
///
/// Produced by the identity layer; the core never parses credentials.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: DbId,
    pub role: Role,
}

/// Per-project collaborator role. Ordered by privilege; the discriminant
/// matches the seed order of the `collaborator_roles` lookup table and
/// doubles as the ranking used when deduplicating dashboard listings
/// (client outranks every collaborator role).
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CollaboratorRole {
    Viewer = 1,
    Editor = 2,
    Admin = 3,
}

impl CollaboratorRole {
    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(CollaboratorRole::Viewer),
            2 => Some(CollaboratorRole::Editor),
            3 => Some(CollaboratorRole::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollaboratorRole::Viewer => "viewer",
            CollaboratorRole::Editor => "editor",
            CollaboratorRole::Admin => "admin",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "viewer" => Some(CollaboratorRole::Viewer),
            "editor" => Some(CollaboratorRole::Editor),
            "admin" => Some(CollaboratorRole::Admin),
            _ => None,
        }
    }
}

/// Ownership facts about a project, fetched by the caller before the check.
#[derive(Debug, Clone, Copy)]
pub struct ProjectAccess {
    pub client_id: DbId,
    pub developer_id: Option<DbId>,
    pub status: ProjectStatus,
    /// The principal's collaborator grant on this project, if any.
    pub collaborator_role: Option<CollaboratorRole>,
}

/// Reject principals below `minimum` with a generic `Forbidden`.
pub fn require_role(principal: &Principal, minimum: Role) -> Result<(), CoreError> {
    if principal.role.at_least(minimum) {
        Ok(())
    } else {
        Err(forbidden())
    }
}

/// Reject non-admin principals.
pub fn require_admin(principal: &Principal) -> Result<(), CoreError> {
    if principal.role.is_admin() {
        Ok(())
    } else {
        Err(forbidden())
    }
}

/// Self-access check for per-user resources (dashboards, profiles).
///
/// Admins do not bypass this: a dashboard is only ever built for the
/// authenticated caller, even when the caller could read the underlying
/// rows individually.
pub fn require_self(principal: &Principal, owner_id: DbId) -> Result<(), CoreError> {
    if principal.user_id == owner_id {
        Ok(())
    } else {
        Err(forbidden())
    }
}

/// May the principal read a project request owned by `owner_id`?
pub fn can_read_request(principal: &Principal, owner_id: DbId) -> bool {
    principal.role.is_admin() || principal.user_id == owner_id
}

/// May the principal edit a project request's fields?
///
/// The owner may edit only while the request is still client-editable
/// (`requested` / `in_review`); admins may edit any non-terminal request.
pub fn can_mutate_request(
    principal: &Principal,
    owner_id: DbId,
    status: crate::status::RequestStatus,
) -> bool {
    if status.is_terminal() {
        return false;
    }
    if principal.role.is_admin() {
        return true;
    }
    principal.user_id == owner_id && status.is_client_editable()
}

/// May the principal read a project?
///
/// Clients see their own projects and projects they collaborate on.
/// Developers additionally see the available pool (approved, unassigned)
/// and any project assigned to them. Admins see everything.
pub fn can_read_project(principal: &Principal, access: &ProjectAccess) -> bool {
    if principal.role.is_admin() {
        return true;
    }
    if principal.user_id == access.client_id || access.collaborator_role.is_some() {
        return true;
    }
    if principal.role.at_least(Role::Developer) {
        if access.developer_id == Some(principal.user_id) {
            return true;
        }
        // The available pool is visible to every developer.
        if access.status == ProjectStatus::Approved && access.developer_id.is_none() {
            return true;
        }
    }
    false
}

/// May the principal mutate a project's fields?
///
/// Only the assigned developer or an admin. Owning clients and
/// collaborators read; they do not write project fields.
pub fn can_mutate_project(principal: &Principal, access: &ProjectAccess) -> bool {
    principal.role.is_admin() || access.developer_id == Some(principal.user_id)
}

/// May the principal record a status update on this project?
pub fn can_record_status_update(principal: &Principal, access: &ProjectAccess) -> bool {
    can_mutate_project(principal, access)
}

/// May the principal manage (add/remove) collaborators on this project?
pub fn can_manage_collaborators(principal: &Principal, access: &ProjectAccess) -> bool {
    principal.role.is_admin() || principal.user_id == access.client_id
}

/// May the principal see a project's internal notes?
pub fn can_view_internal_notes(principal: &Principal, access: &ProjectAccess) -> bool {
    principal.role.is_admin() || access.developer_id == Some(principal.user_id)
}

fn forbidden() -> CoreError {
    CoreError::Forbidden("Insufficient permissions".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RequestStatus;
    use assert_matches::assert_matches;

    fn principal(user_id: DbId, role: Role) -> Principal {
        Principal { user_id, role }
    }

    fn access(
        client_id: DbId,
        developer_id: Option<DbId>,
        status: ProjectStatus,
        collaborator_role: Option<CollaboratorRole>,
    ) -> ProjectAccess {
        ProjectAccess {
            client_id,
            developer_id,
            status,
            collaborator_role,
        }
    }

    #[test]
    fn require_role_gates_on_ordering() {
        assert!(require_role(&principal(1, Role::Developer), Role::Developer).is_ok());
        assert!(require_role(&principal(1, Role::SuperAdmin), Role::Admin).is_ok());
        assert_matches!(
            require_role(&principal(1, Role::Client), Role::Developer),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn require_self_rejects_other_users_including_admins() {
        assert!(require_self(&principal(7, Role::Client), 7).is_ok());
        assert_matches!(
            require_self(&principal(7, Role::Admin), 8),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn clients_read_only_their_own_requests() {
        assert!(can_read_request(&principal(1, Role::Client), 1));
        assert!(!can_read_request(&principal(1, Role::Client), 2));
        assert!(can_read_request(&principal(9, Role::Admin), 2));
    }

    #[test]
    fn owner_edits_end_at_terminal_status() {
        let owner = principal(1, Role::Client);
        assert!(can_mutate_request(&owner, 1, RequestStatus::Requested));
        assert!(can_mutate_request(&owner, 1, RequestStatus::InReview));
        assert!(!can_mutate_request(&owner, 1, RequestStatus::Approved));
        assert!(!can_mutate_request(&owner, 1, RequestStatus::Cancelled));
        // Terminal requests are frozen for admins too.
        assert!(!can_mutate_request(&principal(9, Role::Admin), 1, RequestStatus::Approved));
    }

    #[test]
    fn client_reads_own_and_collaborated_projects_only() {
        let p = principal(1, Role::Client);
        assert!(can_read_project(&p, &access(1, None, ProjectStatus::InProgress, None)));
        assert!(can_read_project(
            &p,
            &access(2, None, ProjectStatus::InProgress, Some(CollaboratorRole::Viewer))
        ));
        assert!(!can_read_project(&p, &access(2, None, ProjectStatus::InProgress, None)));
        // Clients never see the available pool.
        assert!(!can_read_project(&p, &access(2, None, ProjectStatus::Approved, None)));
    }

    #[test]
    fn developer_sees_pool_and_assigned_work() {
        let dev = principal(5, Role::Developer);
        // Available pool: approved and unassigned.
        assert!(can_read_project(&dev, &access(2, None, ProjectStatus::Approved, None)));
        // Assigned to them.
        assert!(can_read_project(&dev, &access(2, Some(5), ProjectStatus::InProgress, None)));
        // Assigned to someone else: invisible.
        assert!(!can_read_project(&dev, &access(2, Some(6), ProjectStatus::InProgress, None)));
        // Claimed projects leave the pool.
        assert!(!can_read_project(&dev, &access(2, Some(6), ProjectStatus::Approved, None)));
    }

    #[test]
    fn project_mutation_is_assigned_developer_or_admin() {
        let a = access(2, Some(5), ProjectStatus::InProgress, None);
        assert!(can_mutate_project(&principal(5, Role::Developer), &a));
        assert!(can_mutate_project(&principal(9, Role::SuperAdmin), &a));
        assert!(!can_mutate_project(&principal(6, Role::Developer), &a));
        // The owning client reads but does not write.
        assert!(!can_mutate_project(&principal(2, Role::Client), &a));
    }

    #[test]
    fn collaborator_management_is_owner_or_admin() {
        let a = access(2, Some(5), ProjectStatus::InProgress, None);
        assert!(can_manage_collaborators(&principal(2, Role::Client), &a));
        assert!(can_manage_collaborators(&principal(9, Role::Admin), &a));
        assert!(!can_manage_collaborators(&principal(5, Role::Developer), &a));
    }

    #[test]
    fn internal_notes_hidden_from_clients_and_collaborators() {
        let a = access(2, Some(5), ProjectStatus::InProgress, Some(CollaboratorRole::Admin));
        assert!(can_view_internal_notes(&principal(5, Role::Developer), &a));
        assert!(can_view_internal_notes(&principal(9, Role::Admin), &a));
        assert!(!can_view_internal_notes(&principal(2, Role::Client), &a));
    }

    #[test]
    fn collaborator_role_ordering_and_ids() {
        assert!(CollaboratorRole::Viewer < CollaboratorRole::Editor);
        assert!(CollaboratorRole::Editor < CollaboratorRole::Admin);
        for id in 1..=3 {
            assert_eq!(CollaboratorRole::from_id(id).unwrap().id(), id);
        }
        assert_eq!(CollaboratorRole::parse("editor"), Some(CollaboratorRole::Editor));
        assert_eq!(CollaboratorRole::parse("owner"), None);
    }
}
