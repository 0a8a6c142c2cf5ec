//! Persistence seams for the folio workspace.
//!
//! Three small trait boundaries cover everything the access-control core
//! stores or reads: contact messages, the user profile directory, and a
//! durable client-scoped slot (the localStorage analog backing the rate
//! limiter). Each has an in-memory double for tests plus the real
//! implementation: a JSON-array file for messages and an embedded ReDB
//! database for slots.

pub mod client_slot;
pub mod config;
pub mod error;
pub mod messages;
pub mod profiles;

// Re-export commonly used types
pub use client_slot::{ClientSlot, MemorySlot, RedbSlot};
pub use config::StorageConfig;
pub use error::{Result, StorageError};
pub use messages::{JsonFileMessageStore, MemoryMessageStore, MessageStore, NewMessage, StoredMessage};
pub use profiles::{MemoryProfileStore, ProfileRecord, ProfileStore};
