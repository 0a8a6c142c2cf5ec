//! Role-based authorization for the folio dashboard and contact surfaces.
//!
//! This crate defines a closed-world catalog of roles and permissions
//! (`types`), three pure check functions over that catalog, and an
//! admin-only role preview overlay (`simulation`). There is no policy
//! language and no dynamic rule loading: the catalog is fixed at compile
//! time and every authorization decision is a set lookup.
//!
//! # Evaluation Rules
//!
//! 1. **Admin is a wildcard.** The admin role passes every check, present
//!    and future, without consulting any permission set.
//! 2. **Everyone else is membership.** A non-admin actor passes exactly
//!    the checks their granted set contains.
//! 3. **Unknown tags never reach evaluation.** Role and permission
//!    strings are parsed at the edge; anything outside the catalog is
//!    rejected there as an [`AuthzError`].
//!
//! Checks take the granted set explicitly rather than reading it from
//! ambient state, so the same functions serve live sessions, previewed
//! roles, and tests.

pub mod error;
pub mod simulation;
pub mod types;

use std::collections::HashSet;

pub use error::{AuthzError, Result};
pub use simulation::RoleSimulation;
pub use types::{all_permissions, role_permissions, Permission, Role};

/// Checks whether an actor holds a single permission.
///
/// # Arguments
///
/// * `role` - The actor's role
/// * `granted` - The actor's live granted set
/// * `permission` - The permission being checked
///
/// # Returns
///
/// `true` when the role is admin, or when `granted` contains the
/// permission. The admin branch never inspects `granted`: an admin with
/// an empty or stale set still passes.
///
/// # Example
///
/// ```rust
/// use authz::{can, role_permissions, Permission, Role};
///
/// let granted = role_permissions(Role::Support);
/// assert!(can(Role::Support, granted, Permission::ViewMessages));
/// assert!(!can(Role::Support, granted, Permission::ManageUsers));
/// ```
pub fn can(role: Role, granted: &HashSet<Permission>, permission: Permission) -> bool {
    if role == Role::Admin {
        return true;
    }
    granted.contains(&permission)
}

/// Checks whether an actor holds every listed permission.
///
/// An empty list is vacuously satisfied for any role. Admin passes
/// without consulting the list.
pub fn has_all(role: Role, granted: &HashSet<Permission>, permissions: &[Permission]) -> bool {
    if role == Role::Admin {
        return true;
    }
    permissions.iter().all(|p| granted.contains(p))
}

/// Checks whether an actor holds at least one listed permission.
///
/// An empty list yields `false` for every non-admin role, since there is
/// nothing the actor could hold. Admin passes without consulting the
/// list.
pub fn has_any(role: Role, granted: &HashSet<Permission>, permissions: &[Permission]) -> bool {
    if role == Role::Admin {
        return true;
    }
    permissions.iter().any(|p| granted.contains(p))
}
