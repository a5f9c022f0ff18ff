//! Request and project lifecycle status enums.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database lookup table. Legal state
//! transitions are encoded here so the persistence and HTTP layers never
//! compare raw status values themselves.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Resolve a status from its database ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// The status name as stored in the lookup table.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Parse a status name. Returns `None` for unknown names.
            pub fn parse(name: &str) -> Option<Self> {
                match name {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status_enum! {
    /// Project request lifecycle status.
    RequestStatus {
        Requested = 1 => "requested",
        InReview = 2 => "in_review",
        Approved = 3 => "approved",
        Cancelled = 4 => "cancelled",
    }
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Approved = 1 => "approved",
        InProgress = 2 => "in_progress",
        InTesting = 3 => "in_testing",
        ReadyForLaunch = 4 => "ready_for_launch",
        Completed = 5 => "completed",
        Cancelled = 6 => "cancelled",
    }
}

impl RequestStatus {
    /// `approved` and `cancelled` are terminal; the request row freezes
    /// (audit fields aside) once either is reached.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Cancelled)
    }

    /// Legal admin transitions. `requested -> approved` is deliberately
    /// absent: approval is only valid from `in_review` (see the approve
    /// path), and no-op transitions are not legal edges.
    ///
    /// `in_review -> requested` is the "send back for more info" edge.
    pub fn can_transition(self, to: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, to),
            (Requested, InReview)
                | (Requested, Cancelled)
                | (InReview, Requested)
                | (InReview, Approved)
                | (InReview, Cancelled)
        )
    }

    /// True while the owning client may still edit the request.
    pub fn is_client_editable(self) -> bool {
        matches!(self, RequestStatus::Requested | RequestStatus::InReview)
    }
}

impl ProjectStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }

    /// Legal transitions recorded via status updates. Assignment is the only
    /// way to leave `approved` for `in_progress` and is handled separately
    /// by the claim protocol, so it is not an edge here.
    pub fn can_transition(self, to: ProjectStatus) -> bool {
        use ProjectStatus::*;
        match (self, to) {
            (InProgress, InTesting) => true,
            (InTesting, ReadyForLaunch) => true,
            (ReadyForLaunch, Completed) => true,
            // Testing can send work back to development.
            (InTesting, InProgress) => true,
            (ReadyForLaunch, InTesting) => true,
            // Cancellation is reachable from any non-terminal state.
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// Statuses counted as "active" in dashboard summaries.
pub const ACTIVE_PROJECT_STATUSES: [ProjectStatus; 3] = [
    ProjectStatus::InProgress,
    ProjectStatus::InTesting,
    ProjectStatus::ReadyForLaunch,
];
