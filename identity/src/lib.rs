//! Identity boundary for the folio workspace.
//!
//! Everything the rest of the workspace knows about accounts and sessions
//! comes through here: the [`IdentityProvider`] trait over the external
//! auth backend, the [`SessionTracker`] that turns provider calls into
//! observable `{ user, profile, loading }` snapshots, and the
//! normalization that maps raw backend profile rows onto the catalog.

pub mod directory;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use directory::{SeedAccount, StaticDirectory};
pub use error::{IdentityError, Result};
pub use normalize::{permissions_from_value, profile_from_value};
pub use provider::{Credentials, IdentityProvider, Registration};
pub use session::SessionTracker;
pub use types::{Profile, SessionState, UserAccount};
