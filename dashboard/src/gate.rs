//! Pure section and action flag computation
//!
//! These functions turn one (role, granted set) pair into display flags.
//! They know nothing about sessions or simulation; the panel decides
//! which pair is in effect before calling them.

use std::collections::HashSet;

use serde::Serialize;

use authz::{can, Permission, Role};

/// Which dashboard sections the current access renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SectionVisibility {
    pub messages: bool,
    pub analytics: bool,
    pub user_management: bool,
}

/// Which per-message actions the current access offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MessageActions {
    pub reply: bool,
    pub delete: bool,
}

/// Section flags for a role and its granted permissions
pub fn visible_sections(role: Role, granted: &HashSet<Permission>) -> SectionVisibility {
    SectionVisibility {
        messages: can(role, granted, Permission::ViewMessages),
        analytics: can(role, granted, Permission::ViewAnalytics),
        user_management: can(role, granted, Permission::ManageUsers),
    }
}

/// Action flags for a role and its granted permissions
pub fn message_actions(role: Role, granted: &HashSet<Permission>) -> MessageActions {
    MessageActions {
        reply: can(role, granted, Permission::ReplyMessages),
        delete: can(role, granted, Permission::DeleteMessages),
    }
}
