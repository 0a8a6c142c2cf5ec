//! Session-state tracking over an external identity provider

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::Result;
use crate::provider::{Credentials, IdentityProvider, Registration};
use crate::types::{Profile, SessionState, UserAccount};

/// Owns the `{ user, profile, loading }` state machine.
///
/// Every change is published on a watch channel so consumers always see
/// the latest snapshot. The tracker starts in the loading state; gated
/// consumers must not evaluate anything until the first resolution lands.
pub struct SessionTracker {
    provider: Arc<dyn IdentityProvider>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionTracker {
    /// Create a tracker in the loading state, before any resolution
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::loading());
        Self { provider, state_tx }
    }

    /// Subscribe to session snapshots
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Latest published snapshot
    pub fn current(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Resolve the session from the provider and publish the result
    pub async fn refresh(&self) -> Result<SessionState> {
        let state = match self.provider.session().await? {
            Some(user) => self.resolve(user).await,
            None => SessionState::signed_out(),
        };
        self.publish(state.clone());
        Ok(state)
    }

    /// Sign in and publish the resolved session.
    ///
    /// A failed sign-in propagates the error and leaves the published
    /// state untouched.
    pub async fn sign_in(&self, credentials: Credentials) -> Result<SessionState> {
        let user = self.provider.sign_in(credentials).await?;
        let state = self.resolve(user).await;
        self.publish(state.clone());
        Ok(state)
    }

    /// Register, then publish the session for the new account
    pub async fn sign_up(&self, registration: Registration) -> Result<SessionState> {
        let user = self.provider.sign_up(registration).await?;
        let state = self.resolve(user).await;
        self.publish(state.clone());
        Ok(state)
    }

    /// Sign out and publish the signed-out state
    pub async fn sign_out(&self) -> Result<()> {
        self.provider.sign_out().await?;
        self.publish(SessionState::signed_out());
        Ok(())
    }

    async fn resolve(&self, user: UserAccount) -> SessionState {
        let profile = self.resolve_profile(&user.id).await;
        SessionState::signed_in(user, profile)
    }

    /// Profile lookup with the lowest-privilege degradation rule.
    ///
    /// A profile the backend cannot produce must never widen access, so
    /// the fallback is the plain user role with no grants. The failure is
    /// logged, not surfaced.
    async fn resolve_profile(&self, user_id: &str) -> Profile {
        match self.provider.profile(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile fetch failed for {}: {}", user_id, e);
                Profile::lowest_privilege()
            }
        }
    }

    fn publish(&self, state: SessionState) {
        debug!(
            "Session state: loading={} signed_in={}",
            state.loading,
            state.user.is_some()
        );
        self.state_tx.send_replace(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;
    use crate::error::IdentityError;
    use async_trait::async_trait;
    use authz::Role;
    use chrono::Utc;

    /// Provider whose profile lookups always fail
    struct BrokenProfiles;

    #[async_trait]
    impl IdentityProvider for BrokenProfiles {
        async fn session(&self) -> Result<Option<UserAccount>> {
            Ok(Some(account()))
        }

        async fn sign_in(&self, _credentials: Credentials) -> Result<UserAccount> {
            Ok(account())
        }

        async fn sign_up(&self, _registration: Registration) -> Result<UserAccount> {
            Ok(account())
        }

        async fn sign_out(&self) -> Result<()> {
            Ok(())
        }

        async fn profile(&self, _user_id: &str) -> Result<Profile> {
            Err(IdentityError::Provider("profiles table offline".to_string()))
        }
    }

    fn account() -> UserAccount {
        UserAccount {
            id: "acct-1".to_string(),
            email: "someone@example.com".to_string(),
            display_name: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_tracker_starts_loading_and_resolves() {
        let tracker = SessionTracker::new(Arc::new(StaticDirectory::demo()));
        assert!(tracker.current().loading);

        let state = tracker.refresh().await.unwrap();
        assert!(state.is_resolved());
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_sign_in_publishes_resolved_profile() {
        let tracker = SessionTracker::new(Arc::new(StaticDirectory::demo()));
        let mut rx = tracker.subscribe();

        let state = tracker
            .sign_in(Credentials {
                email: "editor@folio.dev".to_string(),
                password: "editor".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(state.profile.as_ref().unwrap().role, Role::Editor);

        rx.changed().await.unwrap();
        let observed = rx.borrow().clone();
        assert_eq!(observed.profile.unwrap().role, Role::Editor);
    }

    #[tokio::test]
    async fn test_profile_failure_degrades_to_lowest_privilege() {
        let tracker = SessionTracker::new(Arc::new(BrokenProfiles));
        let state = tracker.refresh().await.unwrap();

        let profile = state.profile.unwrap();
        assert_eq!(profile.role, Role::User);
        assert!(profile.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_state_untouched() {
        let tracker = SessionTracker::new(Arc::new(StaticDirectory::demo()));
        tracker.refresh().await.unwrap();

        let result = tracker
            .sign_in(Credentials {
                email: "admin@folio.dev".to_string(),
                password: "nope".to_string(),
            })
            .await;
        assert!(result.is_err());
        assert!(tracker.current().user.is_none());
        assert!(tracker.current().is_resolved());
    }

    #[tokio::test]
    async fn test_sign_out_publishes_signed_out_state() {
        let tracker = SessionTracker::new(Arc::new(StaticDirectory::demo()));
        tracker
            .sign_in(Credentials {
                email: "user@folio.dev".to_string(),
                password: "user".to_string(),
            })
            .await
            .unwrap();
        assert!(tracker.current().user.is_some());

        tracker.sign_out().await.unwrap();
        let state = tracker.current();
        assert!(state.user.is_none());
        assert!(state.profile.is_none());
        assert!(state.is_resolved());
    }
}
