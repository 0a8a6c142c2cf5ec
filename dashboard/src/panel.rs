//! Admin dashboard panel state
//!
//! The panel composes the live session with the role-preview overlay and
//! turns the pair into gate flags, published over a watch channel. Every
//! data fetch re-checks its section flag first, and a fetch epoch bumps
//! on each preview change so cached section data is never shown across a
//! role switch. A preview is scoped to the admin session that started
//! it; signing out or signing in under another account ends it.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::info;

use authz::{can, role_permissions, Permission, Role, RoleSimulation};
use identity::{SessionState, SessionTracker};
use storage::{MessageStore, ProfileRecord, ProfileStore, StoredMessage};

use crate::error::Result;
use crate::gate::{message_actions, visible_sections, MessageActions, SectionVisibility};

/// Flags and preview state for one render of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateSnapshot {
    /// Whether the session has finished loading
    pub resolved: bool,
    /// Whether the panel itself is reachable
    pub admin_panel: bool,
    pub sections: SectionVisibility,
    pub actions: MessageActions,
    /// Role currently previewed, if any
    pub simulated: Option<Role>,
    /// Bumped on every preview change; section data cached under an older
    /// epoch must be refetched
    pub fetch_epoch: u64,
}

impl GateSnapshot {
    fn hidden(resolved: bool, fetch_epoch: u64) -> Self {
        Self {
            resolved,
            admin_panel: false,
            sections: SectionVisibility::default(),
            actions: MessageActions::default(),
            simulated: None,
            fetch_epoch,
        }
    }
}

/// Aggregate view of message traffic for the analytics section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_messages: usize,
    pub messages_today: usize,
    pub latest_message_at: Option<DateTime<Utc>>,
}

impl AnalyticsSummary {
    /// Summarize a message listing, bucketing "today" by local date
    pub fn from_messages(messages: &[StoredMessage]) -> Self {
        let today = Local::now().date_naive();
        let messages_today = messages
            .iter()
            .filter(|message| message.created_at.with_timezone(&Local).date_naive() == today)
            .count();

        Self {
            total_messages: messages.len(),
            messages_today,
            latest_message_at: messages.iter().map(|message| message.created_at).max(),
        }
    }
}

/// Preview overlay, the admin session that owns it, and the epoch it
/// invalidates
struct Overlay {
    simulation: RoleSimulation,
    previewed_by: Option<String>,
    fetch_epoch: u64,
}

impl Overlay {
    /// Preview to honor for `state`.
    ///
    /// Only the signed-in admin who started the preview ever sees it; any
    /// other session, including a later sign-in on the same panel,
    /// evaluates against its own access.
    fn active_preview(&self, state: &SessionState) -> Option<Role> {
        let target = self.simulation.previewed()?;
        let owner = self.previewed_by.as_deref()?;
        let user = state.user.as_ref()?;
        let profile = state.profile.as_ref()?;
        if user.id == owner && profile.role == Role::Admin {
            Some(target)
        } else {
            None
        }
    }

    /// Drop a preview whose owning session is gone
    fn reconcile(&mut self, state: &SessionState) {
        if !self.simulation.is_active() || !state.is_resolved() {
            return;
        }
        if self.active_preview(state).is_none() {
            self.simulation.clear();
            self.previewed_by = None;
            self.fetch_epoch += 1;
            info!("Session changed, dropping role preview");
        }
    }
}

/// Stateful gate in front of the dashboard's data sections
pub struct DashboardPanel {
    tracker: Arc<SessionTracker>,
    messages: Arc<dyn MessageStore>,
    profiles: Arc<dyn ProfileStore>,
    overlay: Mutex<Overlay>,
    flags_tx: watch::Sender<GateSnapshot>,
}

impl DashboardPanel {
    pub fn new(
        tracker: Arc<SessionTracker>,
        messages: Arc<dyn MessageStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        let overlay = Overlay {
            simulation: RoleSimulation::new(),
            previewed_by: None,
            fetch_epoch: 0,
        };
        let (flags_tx, _) = watch::channel(compute(&tracker.current(), &overlay));

        Self {
            tracker,
            messages,
            profiles,
            overlay: Mutex::new(overlay),
            flags_tx,
        }
    }

    /// Observe gate flag changes
    pub fn subscribe(&self) -> watch::Receiver<GateSnapshot> {
        self.flags_tx.subscribe()
    }

    /// Recompute the gate flags from the live session and publish them
    pub async fn flags(&self) -> GateSnapshot {
        let state = self.tracker.current();
        let mut overlay = self.overlay.lock().await;
        overlay.reconcile(&state);
        let snapshot = compute(&state, &overlay);
        self.flags_tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Start previewing the dashboard as `target`.
    ///
    /// Only a signed-in admin can start a preview, and the preview lasts
    /// at most as long as that admin's session; for anyone else this
    /// returns `false` and changes nothing. A successful change bumps the
    /// fetch epoch and republishes the flags.
    pub async fn simulate(&self, target: Role) -> bool {
        let state = self.tracker.current();
        if !state.is_resolved() {
            return false;
        }
        let (user, real_role) = match (&state.user, &state.profile) {
            (Some(user), Some(profile)) => (user, profile.role),
            _ => return false,
        };

        let mut overlay = self.overlay.lock().await;
        overlay.reconcile(&state);
        if !overlay.simulation.preview(real_role, target) {
            return false;
        }
        overlay.previewed_by = Some(user.id.clone());
        overlay.fetch_epoch += 1;
        info!("Previewing dashboard as role: {}", target);

        self.flags_tx.send_replace(compute(&state, &overlay));
        true
    }

    /// Drop an active preview. Returns whether one was active.
    pub async fn clear_simulation(&self) -> bool {
        let state = self.tracker.current();
        let mut overlay = self.overlay.lock().await;
        overlay.reconcile(&state);
        if !overlay.simulation.is_active() {
            return false;
        }
        overlay.simulation.clear();
        overlay.previewed_by = None;
        overlay.fetch_epoch += 1;
        info!("Role preview cleared");

        self.flags_tx.send_replace(compute(&state, &overlay));
        true
    }

    /// Message listing, or `None` while the section is hidden
    pub async fn fetch_messages(&self) -> Result<Option<Vec<StoredMessage>>> {
        let snapshot = self.snapshot().await;
        if !(snapshot.admin_panel && snapshot.sections.messages) {
            return Ok(None);
        }
        Ok(Some(self.messages.list().await?))
    }

    /// Traffic summary, or `None` while the section is hidden
    pub async fn fetch_analytics(&self) -> Result<Option<AnalyticsSummary>> {
        let snapshot = self.snapshot().await;
        if !(snapshot.admin_panel && snapshot.sections.analytics) {
            return Ok(None);
        }
        let messages = self.messages.list().await?;
        Ok(Some(AnalyticsSummary::from_messages(&messages)))
    }

    /// Profile directory, or `None` while the section is hidden
    pub async fn fetch_profiles(&self) -> Result<Option<Vec<ProfileRecord>>> {
        let snapshot = self.snapshot().await;
        if !(snapshot.admin_panel && snapshot.sections.user_management) {
            return Ok(None);
        }
        Ok(Some(self.profiles.list_profiles().await?))
    }

    /// Reassign an account's role. Returns `false` when the effective
    /// access does not include user management; a preview therefore
    /// withholds this even from the real admin behind it.
    pub async fn set_role(&self, user_id: &str, new_role: Role) -> Result<bool> {
        let snapshot = self.snapshot().await;
        if !(snapshot.admin_panel && snapshot.sections.user_management) {
            return Ok(false);
        }
        self.profiles.update_role(user_id, new_role).await?;
        Ok(true)
    }

    /// Current flags without publishing
    async fn snapshot(&self) -> GateSnapshot {
        let state = self.tracker.current();
        let mut overlay = self.overlay.lock().await;
        overlay.reconcile(&state);
        compute(&state, &overlay)
    }
}

/// Gate flags for one session state under one overlay
fn compute(state: &SessionState, overlay: &Overlay) -> GateSnapshot {
    if !state.is_resolved() {
        return GateSnapshot::hidden(false, overlay.fetch_epoch);
    }
    let Some(profile) = &state.profile else {
        return GateSnapshot::hidden(true, overlay.fetch_epoch);
    };

    let previewed = overlay.active_preview(state);
    let (role, granted): (Role, &HashSet<Permission>) = match previewed {
        Some(previewed) => (previewed, role_permissions(previewed)),
        None => (profile.role, &profile.permissions),
    };

    GateSnapshot {
        resolved: true,
        admin_panel: can(role, granted, Permission::AccessAdminPanel),
        sections: visible_sections(role, granted),
        actions: message_actions(role, granted),
        simulated: previewed,
        fetch_epoch: overlay.fetch_epoch,
    }
}
