//! Roles and the capability model.
//!
//! Role names must match the `chk_users_role` constraint in the initial
//! migration. Authorization is always decided by [`Role::can`]; handlers never
//! compare role strings directly.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_REVIEWER: &str = "reviewer";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_EMPLOYEE, ROLE_REVIEWER, ROLE_ADMIN];

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Reviewer,
    Admin,
}

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create new ideas.
    SubmitIdea,
    /// Read and filter ideas.
    ViewIdeas,
    /// Edit or withdraw ideas the caller submitted.
    EditOwnIdea,
    /// Read and acknowledge the caller's own notifications.
    ViewOwnNotifications,
    /// Read the individual and department leaderboards.
    ViewLeaderboard,
    /// Transition idea status.
    ReviewIdeas,
    /// Read cross-user idea statistics.
    ViewStats,
    /// Create, list, update and deactivate users.
    ManageUsers,
}

const EMPLOYEE_CAPABILITIES: &[Capability] = &[
    Capability::SubmitIdea,
    Capability::ViewIdeas,
    Capability::EditOwnIdea,
    Capability::ViewOwnNotifications,
    Capability::ViewLeaderboard,
];

const REVIEWER_CAPABILITIES: &[Capability] = &[Capability::ReviewIdeas, Capability::ViewStats];

const ADMIN_CAPABILITIES: &[Capability] = &[Capability::ManageUsers];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => ROLE_EMPLOYEE,
            Self::Reviewer => ROLE_REVIEWER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a stored or client-supplied role name.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_EMPLOYEE => Ok(Self::Employee),
            ROLE_REVIEWER => Ok(Self::Reviewer),
            ROLE_ADMIN => Ok(Self::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    /// Whether this role grants `capability`.
    ///
    /// Roles are cumulative: reviewers hold every employee capability and
    /// admins hold every reviewer capability.
    pub fn can(&self, capability: Capability) -> bool {
        let tiers: &[&[Capability]] = match self {
            Self::Employee => &[EMPLOYEE_CAPABILITIES],
            Self::Reviewer => &[EMPLOYEE_CAPABILITIES, REVIEWER_CAPABILITIES],
            Self::Admin => &[
                EMPLOYEE_CAPABILITIES,
                REVIEWER_CAPABILITIES,
                ADMIN_CAPABILITIES,
            ],
        };
        tiers.iter().any(|tier| tier.contains(&capability))
    }

    /// Roles that receive `idea_submitted` notifications.
    pub fn reviewing_roles() -> [Role; 2] {
        [Role::Reviewer, Role::Admin]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
