//! Account and session-state types

use std::collections::HashSet;

use authz::{role_permissions, Permission, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record as the external identity backend reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Access profile attached to an account: role plus the live granted set.
///
/// The granted set may be broader or narrower than the catalog default for
/// the role. Authorization reads it as-is; only simulation substitutes the
/// catalog set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub role: Role,
    #[serde(default)]
    pub permissions: HashSet<Permission>,
}

impl Profile {
    /// Profile carrying the catalog default set for a role
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            permissions: role_permissions(role).clone(),
        }
    }

    /// Lowest-privilege fallback used when the real profile cannot be fetched.
    ///
    /// A profile the backend cannot produce must never widen access.
    pub fn lowest_privilege() -> Self {
        Self {
            role: Role::User,
            permissions: HashSet::new(),
        }
    }
}

/// Snapshot of the session as consumers observe it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<UserAccount>,
    pub profile: Option<Profile>,
    pub loading: bool,
}

impl SessionState {
    /// State before the first session resolution completes
    pub fn loading() -> Self {
        Self {
            user: None,
            profile: None,
            loading: true,
        }
    }

    /// Resolved state with nobody signed in
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Resolved state for a signed-in account
    pub fn signed_in(user: UserAccount, profile: Profile) -> Self {
        Self {
            user: Some(user),
            profile: Some(profile),
            loading: false,
        }
    }

    /// Whether the session has finished resolving
    pub fn is_resolved(&self) -> bool {
        !self.loading
    }
}
