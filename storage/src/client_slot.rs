//! Durable client-scoped key-value slots

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, TableDefinition};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Result;

// Table for client-scoped string slots
const SLOT_TABLE: TableDefinition<&str, &str> = TableDefinition::new("client_slots");

/// Small durable string slots scoped to one client.
///
/// The browser analog is localStorage: values survive restarts but are
/// never shared across client identities. Each slot has a single writer;
/// concurrent writers from other processes are not coordinated.
#[async_trait]
pub trait ClientSlot: Send + Sync {
    /// Stored value for a key, `None` when never written
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the stored value for a key
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the stored value for a key
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory slot for tests
#[derive(Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientSlot for MemorySlot {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// Slot store using ReDB for persistent key-value storage
pub struct RedbSlot {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbSlot {
    /// Open (or create) the slot database at the given path
    pub fn new(slot_path: impl AsRef<Path>) -> Result<Self> {
        let path = slot_path.as_ref().to_path_buf();

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Opening client slot database at: {:?}", path);
        let db = Database::create(&path)?;

        // Initialize the table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SLOT_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            path,
        })
    }

    /// Get the path to the slot database
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_sync(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SLOT_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn write_sync(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SLOT_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        debug!("Wrote client slot: key={}", key);
        Ok(())
    }

    fn remove_sync(&self, key: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SLOT_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        debug!("Removed client slot: key={}", key);
        Ok(())
    }
}

#[async_trait]
impl ClientSlot for RedbSlot {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        self.read_sync(key)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.write_sync(key, value)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.remove_sync(key)
    }
}
