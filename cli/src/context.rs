//! Shared construction of demo sessions, stores, and the dashboard panel

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use authz::Role;
use dashboard::DashboardPanel;
use identity::{Credentials, SessionTracker, StaticDirectory};
use storage::{JsonFileMessageStore, MemoryProfileStore, ProfileRecord, StorageConfig};

/// Credentials for one of the seeded demo accounts, addressed by role name
pub fn demo_credentials(role_name: &str) -> Result<Credentials> {
    let role: Role = role_name
        .parse()
        .with_context(|| format!("'{}' is not a demo account role", role_name))?;

    Ok(Credentials {
        email: format!("{}@folio.dev", role),
        password: role.to_string(),
    })
}

/// Session tracker signed in against the demo directory
pub async fn signed_in_tracker(role_name: &str) -> Result<Arc<SessionTracker>> {
    let tracker = Arc::new(SessionTracker::new(Arc::new(StaticDirectory::demo())));
    let credentials = demo_credentials(role_name)?;
    debug!("Signing in demo account: {}", credentials.email);
    tracker
        .sign_in(credentials)
        .await
        .context("Demo sign-in failed")?;

    Ok(tracker)
}

/// Dashboard panel over the on-disk message store and the demo profiles.
///
/// The profile directory is seeded in memory per invocation; role changes
/// made through it do not persist across runs.
pub async fn dashboard_panel(role_name: &str) -> Result<DashboardPanel> {
    let tracker = signed_in_tracker(role_name).await?;
    let config = StorageConfig::from_env()?;
    debug!("Message file: {}", config.messages_path().display());
    let messages = Arc::new(JsonFileMessageStore::new(config.messages_path())?);
    let profiles = Arc::new(MemoryProfileStore::new(demo_profiles()));

    Ok(DashboardPanel::new(tracker, messages, profiles))
}

/// Profile rows matching the demo directory accounts
fn demo_profiles() -> Vec<ProfileRecord> {
    [Role::Admin, Role::Support, Role::Editor, Role::User]
        .into_iter()
        .map(|role| ProfileRecord {
            user_id: role.to_string(),
            email: format!("{}@folio.dev", role),
            role,
        })
        .collect()
}
