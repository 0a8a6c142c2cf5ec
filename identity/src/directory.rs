//! In-process identity directory
//!
//! A self-contained provider with seeded accounts, standing in for the
//! hosted backend in the CLI and in tests. Passwords are compared as
//! plain strings; this is a demo double, not an authentication
//! implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use authz::Role;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::{IdentityError, Result};
use crate::provider::{Credentials, IdentityProvider, Registration};
use crate::types::{Profile, UserAccount};

/// Seeded account for directory construction
#[derive(Debug, Clone)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub profile: Profile,
}

impl SeedAccount {
    /// Seed carrying the catalog default profile for a role
    pub fn with_role(
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: None,
            profile: Profile::for_role(role),
        }
    }
}

struct DirectoryEntry {
    account: UserAccount,
    password: String,
    profile: Profile,
}

/// In-memory `IdentityProvider` backed by seeded accounts.
///
/// Accounts are keyed by generated id; at most one session is active at a
/// time, matching the single-client session model.
pub struct StaticDirectory {
    entries: Mutex<HashMap<String, DirectoryEntry>>,
    active: Mutex<Option<String>>,
}

impl StaticDirectory {
    /// Build a directory from seeded accounts
    pub fn new(seeds: Vec<SeedAccount>) -> Self {
        let mut entries = HashMap::new();
        for seed in seeds {
            let id = Uuid::new_v4().to_string();
            let entry = DirectoryEntry {
                account: UserAccount {
                    id: id.clone(),
                    email: seed.email,
                    display_name: seed.display_name,
                    created_at: Utc::now(),
                },
                password: seed.password,
                profile: seed.profile,
            };
            entries.insert(id, entry);
        }

        Self {
            entries: Mutex::new(entries),
            active: Mutex::new(None),
        }
    }

    /// Directory with one demo account per role, password equal to the
    /// role name
    pub fn demo() -> Self {
        Self::new(vec![
            SeedAccount::with_role("admin@folio.dev", "admin", Role::Admin),
            SeedAccount::with_role("support@folio.dev", "support", Role::Support),
            SeedAccount::with_role("editor@folio.dev", "editor", Role::Editor),
            SeedAccount::with_role("user@folio.dev", "user", Role::User),
        ])
    }

    /// Replace the stored profile for an account id
    pub async fn set_profile(&self, user_id: &str, profile: Profile) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let entry = entries
            .get_mut(user_id)
            .ok_or_else(|| IdentityError::UserNotFound(user_id.to_string()))?;
        entry.profile = profile;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for StaticDirectory {
    async fn session(&self) -> Result<Option<UserAccount>> {
        let active = self.active.lock().await;
        let entries = self.entries.lock().await;
        Ok(active
            .as_ref()
            .and_then(|id| entries.get(id))
            .map(|entry| entry.account.clone()))
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<UserAccount> {
        let entries = self.entries.lock().await;
        let entry = entries
            .values()
            .find(|entry| entry.account.email == credentials.email)
            .ok_or(IdentityError::InvalidCredentials)?;

        if entry.password != credentials.password {
            return Err(IdentityError::InvalidCredentials);
        }

        let account = entry.account.clone();
        drop(entries);

        *self.active.lock().await = Some(account.id.clone());
        debug!("Signed in: {}", account.email);
        Ok(account)
    }

    async fn sign_up(&self, registration: Registration) -> Result<UserAccount> {
        let mut entries = self.entries.lock().await;
        if entries
            .values()
            .any(|entry| entry.account.email == registration.email)
        {
            return Err(IdentityError::AccountExists(registration.email));
        }

        let id = Uuid::new_v4().to_string();
        let account = UserAccount {
            id: id.clone(),
            email: registration.email,
            display_name: registration.display_name,
            created_at: Utc::now(),
        };
        // New accounts start as plain users until an admin promotes them.
        let entry = DirectoryEntry {
            account: account.clone(),
            password: registration.password,
            profile: Profile::for_role(Role::User),
        };
        entries.insert(id.clone(), entry);
        drop(entries);

        *self.active.lock().await = Some(id);
        debug!("Signed up: {}", account.email);
        Ok(account)
    }

    async fn sign_out(&self) -> Result<()> {
        *self.active.lock().await = None;
        debug!("Signed out");
        Ok(())
    }

    async fn profile(&self, user_id: &str) -> Result<Profile> {
        let entries = self.entries.lock().await;
        entries
            .get(user_id)
            .map(|entry| entry.profile.clone())
            .ok_or_else(|| IdentityError::UserNotFound(user_id.to_string()))
    }
}
