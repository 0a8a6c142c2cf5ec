//! Contact message persistence

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;

/// Message content as submitted, before a stored row exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Stored contact message row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    fn from_new(message: NewMessage) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: message.name,
            email: message.email,
            message: message.message,
            created_at: Utc::now(),
        }
    }
}

/// Message persistence seam.
///
/// The client-side gate is UX only; whichever backend implements this is
/// expected to enforce authorization again on its side.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a message and return the stored row
    async fn insert(&self, message: NewMessage) -> Result<StoredMessage>;

    /// All stored messages, newest first
    async fn list(&self) -> Result<Vec<StoredMessage>>;
}

/// In-memory message store for tests and credential-less demo runs
#[derive(Default)]
pub struct MemoryMessageStore {
    messages: Mutex<Vec<StoredMessage>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn insert(&self, message: NewMessage) -> Result<StoredMessage> {
        let stored = StoredMessage::from_new(message);
        self.messages.lock().await.push(stored.clone());
        debug!("Stored message in memory: {}", stored.id);
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<StoredMessage>> {
        let messages = self.messages.lock().await;
        Ok(messages.iter().rev().cloned().collect())
    }
}

/// File-backed message store.
///
/// Messages live in one pretty-printed JSON array, appended in arrival
/// order. An unreadable array on the write path starts a fresh one so a
/// corrupt file never blocks new submissions; on the read path it is a
/// real error.
pub struct JsonFileMessageStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileMessageStore {
    /// Create a store at the given file path, creating parent directories
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("Message file store at: {:?}", path);

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_array(&self) -> Result<Vec<StoredMessage>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_array(&self, messages: &[StoredMessage]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(messages)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for JsonFileMessageStore {
    async fn insert(&self, message: NewMessage) -> Result<StoredMessage> {
        let _guard = self.write_lock.lock().await;

        let mut messages = match self.read_array().await {
            Ok(messages) => messages,
            Err(e) => {
                warn!("Unreadable message file, starting fresh: {}", e);
                Vec::new()
            }
        };

        let stored = StoredMessage::from_new(message);
        messages.push(stored.clone());
        self.write_array(&messages).await?;

        info!("New message saved from: {}", stored.name);
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<StoredMessage>> {
        let mut messages = self.read_array().await?;
        messages.reverse();
        Ok(messages)
    }
}
