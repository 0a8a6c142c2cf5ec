//! Core role and permission types plus the static role definition table.
//!
//! Roles are coarse identity categories; permissions are fine-grained
//! capability flags gating one dashboard action or data fetch each. The
//! table below is the closed-world default grant per role. Real sessions
//! carry their own granted set (which may be broader or narrower), so the
//! table is the fallback and simulation source, not the live truth.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::AuthzError;

/// Identity category determining the default permission bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every permission, present and future.
    Admin,
    /// Can see and answer messages but not touch sensitive admin actions.
    Support,
    /// Can edit and publish content but not see messages.
    Editor,
    /// Standard authenticated user with no special permissions.
    User,
}

impl Role {
    /// Canonical string form as stored in backend profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Support => "support",
            Role::Editor => "editor",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Role::Admin),
            "support" => Ok(Role::Support),
            "editor" => Ok(Role::Editor),
            "user" => Ok(Role::User),
            other => Err(AuthzError::UnknownRole(other.to_string())),
        }
    }
}

/// Capability flag for one dashboard action or data fetch.
///
/// The set is closed: the evaluator never invents hierarchy between
/// variants, and any relationship between them is spelled out in the role
/// definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    AccessAdminPanel,
    ViewMessages,
    DeleteMessages,
    ReplyMessages,
    EditContent,
    PublishContent,
    ManageUsers,
    ViewAnalytics,
    SystemSettings,
}

impl Permission {
    /// Canonical string form as stored in backend profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::AccessAdminPanel => "access_admin_panel",
            Permission::ViewMessages => "view_messages",
            Permission::DeleteMessages => "delete_messages",
            Permission::ReplyMessages => "reply_messages",
            Permission::EditContent => "edit_content",
            Permission::PublishContent => "publish_content",
            Permission::ManageUsers => "manage_users",
            Permission::ViewAnalytics => "view_analytics",
            Permission::SystemSettings => "system_settings",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AuthzError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "access_admin_panel" => Ok(Permission::AccessAdminPanel),
            "view_messages" => Ok(Permission::ViewMessages),
            "delete_messages" => Ok(Permission::DeleteMessages),
            "reply_messages" => Ok(Permission::ReplyMessages),
            "edit_content" => Ok(Permission::EditContent),
            "publish_content" => Ok(Permission::PublishContent),
            "manage_users" => Ok(Permission::ManageUsers),
            "view_analytics" => Ok(Permission::ViewAnalytics),
            "system_settings" => Ok(Permission::SystemSettings),
            other => Err(AuthzError::UnknownPermission(other.to_string())),
        }
    }
}

/// Every permission the platform knows about.
///
/// Derived by iterating the enum so a newly added variant is picked up
/// automatically; the admin role definition below depends on that.
pub fn all_permissions() -> HashSet<Permission> {
    Permission::iter().collect()
}

static ROLE_DEFINITIONS: Lazy<Vec<(Role, HashSet<Permission>)>> = Lazy::new(|| {
    vec![
        // Admin tracks the full permission set, never a hand-kept copy.
        (Role::Admin, all_permissions()),
        (
            Role::Support,
            HashSet::from([
                Permission::AccessAdminPanel,
                Permission::ViewMessages,
                Permission::ReplyMessages,
            ]),
        ),
        (
            Role::Editor,
            HashSet::from([
                Permission::AccessAdminPanel,
                Permission::EditContent,
                Permission::PublishContent,
                Permission::ViewAnalytics,
            ]),
        ),
        (Role::User, HashSet::new()),
    ]
});

static EMPTY_GRANTS: Lazy<HashSet<Permission>> = Lazy::new(HashSet::new);

/// Default permission set for a role, per the static definition table.
pub fn role_permissions(role: Role) -> &'static HashSet<Permission> {
    ROLE_DEFINITIONS
        .iter()
        .find(|(candidate, _)| *candidate == role)
        .map(|(_, permissions)| permissions)
        .unwrap_or(&EMPTY_GRANTS)
}
