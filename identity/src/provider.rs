//! External identity provider seam
//!
//! The hosted auth backend is consumed through this trait only. Nothing
//! in the workspace implements an authentication protocol; providers are
//! expected to do that on their side of the boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Profile, UserAccount};

/// Password credentials for sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration data for a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Operations the external identity backend exposes.
///
/// Calls resolve to success or failure; there is no streaming. Profile
/// lookups are separate from session lookups because the backend stores
/// them separately and either can fail on its own.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Currently signed-in account, if any
    async fn session(&self) -> Result<Option<UserAccount>>;

    /// Authenticate and open a session
    async fn sign_in(&self, credentials: Credentials) -> Result<UserAccount>;

    /// Create an account and open a session for it
    async fn sign_up(&self, registration: Registration) -> Result<UserAccount>;

    /// Close the current session
    async fn sign_out(&self) -> Result<()>;

    /// Access profile for an account id
    async fn profile(&self, user_id: &str) -> Result<Profile>;
}
