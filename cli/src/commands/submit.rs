use std::sync::Arc;

use anyhow::Result;
use colored::*;

use contact::{ContactSubmission, NotificationKind, SubmissionPipeline};
use storage::{JsonFileMessageStore, RedbSlot, StorageConfig};

/// Execute the submit command
pub async fn execute(name: String, email: String, message: String, website: String) -> Result<()> {
    let config = StorageConfig::from_env()?;
    let store = Arc::new(JsonFileMessageStore::new(config.messages_path())?);
    let slot = Arc::new(RedbSlot::new(config.client_slot_path())?);
    let pipeline = SubmissionPipeline::new(store, slot);

    let outcome = pipeline
        .submit(ContactSubmission {
            name,
            email,
            message,
            website,
        })
        .await;

    let line = match outcome.notification.kind {
        NotificationKind::Success => outcome.notification.message.green(),
        NotificationKind::Error => outcome.notification.message.red(),
        NotificationKind::Warning => outcome.notification.message.yellow(),
        NotificationKind::Info => outcome.notification.message.normal(),
    };
    println!("{}", line);

    if let Some(stored) = outcome.stored {
        println!("Message id: {}", stored.id);
    }

    Ok(())
}
