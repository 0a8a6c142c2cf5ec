//! Admin dashboard gating.
//!
//! Composes the authorization core with the identity session and the
//! stores: pure per-section flag computation in [`gate`], and the
//! stateful [`DashboardPanel`] that owns the role-preview overlay,
//! publishes flag snapshots, and runs permission-gated fetches.

pub mod error;
pub mod gate;
pub mod panel;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use gate::{message_actions, visible_sections, MessageActions, SectionVisibility};
pub use panel::{AnalyticsSummary, DashboardPanel, GateSnapshot};
