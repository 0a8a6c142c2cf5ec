//! Admin-only role preview overlay.
//!
//! Lets an administrator see the dashboard as a lower-privileged role
//! without touching the underlying session. The overlay swaps in the
//! static catalog set for the previewed role because hypothetical roles
//! have no real granted set behind them. It is deliberately not
//! serializable: the preview is a rendering overlay and must never be
//! persisted or sent to a backend.

use std::collections::HashSet;

use crate::types::{role_permissions, Permission, Role};
use crate::{can, has_all, has_any};

/// Optional role override, settable only by a real admin.
#[derive(Debug, Clone, Default)]
pub struct RoleSimulation {
    simulated: Option<Role>,
}

impl RoleSimulation {
    /// Create an overlay with no preview active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start previewing `target`, provided the real role is admin.
    ///
    /// Returns whether the preview was applied. For any other real role
    /// this is a no-op: simulation is a superuser debugging tool, never a
    /// privilege-escalation path.
    pub fn preview(&mut self, real_role: Role, target: Role) -> bool {
        if real_role != Role::Admin {
            return false;
        }
        self.simulated = Some(target);
        true
    }

    /// Drop the preview and fall back to the real session.
    pub fn clear(&mut self) {
        self.simulated = None;
    }

    /// The role currently being previewed, if any.
    pub fn previewed(&self) -> Option<Role> {
        self.simulated
    }

    /// Whether a preview is active.
    pub fn is_active(&self) -> bool {
        self.simulated.is_some()
    }

    /// The role authorization decisions should be made as.
    pub fn effective_role(&self, real_role: Role) -> Role {
        self.simulated.unwrap_or(real_role)
    }

    /// Permission check through the overlay.
    ///
    /// With a preview active, the previewed role's catalog set replaces
    /// the live granted set (the admin wildcard still applies, so
    /// previewing admin grants everything). Without one, this is the
    /// plain live-session check.
    pub fn effective_can(
        &self,
        real_role: Role,
        granted: &HashSet<Permission>,
        permission: Permission,
    ) -> bool {
        match self.simulated {
            Some(previewed) => can(previewed, role_permissions(previewed), permission),
            None => can(real_role, granted, permission),
        }
    }

    /// `has_all` through the overlay; same substitution as [`effective_can`].
    ///
    /// [`effective_can`]: RoleSimulation::effective_can
    pub fn effective_has_all(
        &self,
        real_role: Role,
        granted: &HashSet<Permission>,
        permissions: &[Permission],
    ) -> bool {
        match self.simulated {
            Some(previewed) => has_all(previewed, role_permissions(previewed), permissions),
            None => has_all(real_role, granted, permissions),
        }
    }

    /// `has_any` through the overlay; same substitution as [`effective_can`].
    ///
    /// [`effective_can`]: RoleSimulation::effective_can
    pub fn effective_has_any(
        &self,
        real_role: Role,
        granted: &HashSet<Permission>,
        permissions: &[Permission],
    ) -> bool {
        match self.simulated {
            Some(previewed) => has_any(previewed, role_permissions(previewed), permissions),
            None => has_any(real_role, granted, permissions),
        }
    }
}
