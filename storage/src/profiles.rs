//! User profile directory for the management dashboard

use async_trait::async_trait;
use authz::Role;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{Result, StorageError};

/// Directory row pairing an account with its assigned role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Profile directory seam for the user-management section
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All known profiles
    async fn list_profiles(&self) -> Result<Vec<ProfileRecord>>;

    /// Reassign the role of one account
    async fn update_role(&self, user_id: &str, new_role: Role) -> Result<()>;
}

/// In-memory profile store for tests and demo runs
#[derive(Default)]
pub struct MemoryProfileStore {
    records: Mutex<Vec<ProfileRecord>>,
}

impl MemoryProfileStore {
    pub fn new(records: Vec<ProfileRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn list_profiles(&self) -> Result<Vec<ProfileRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn update_role(&self, user_id: &str, new_role: Role) -> Result<()> {
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|record| record.user_id == user_id)
            .ok_or_else(|| StorageError::NotFound(format!("profile {}", user_id)))?;

        info!(
            "Role change for {}: {} -> {}",
            user_id, record.role, new_role
        );
        record.role = new_role;
        Ok(())
    }
}
