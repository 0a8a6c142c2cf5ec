//! Contact submission pipeline
//!
//! Checks run in a fixed order: field validation, honeypot, rate limit,
//! store write. The rate-limit record is persisted only after the store
//! write succeeds, so failed attempts never consume a daily slot.

use std::sync::Arc;

use tracing::{error, info, warn};

use storage::{ClientSlot, MessageStore, NewMessage, StoredMessage};

use crate::honeypot;
use crate::notify::Notification;
use crate::rate_limit::{
    evaluate, parse_record, DenyReason, RateLimitConfig, RateLimitRecord, Verdict,
    RATE_LIMIT_SLOT_KEY,
};
use crate::submission::ContactSubmission;

/// Response text when a message is accepted
const SENT_OK: &str = "Thanks! Your message has been sent.";

/// Response text when the store write fails
const SEND_FAILED: &str = "Something went wrong sending your message. Please try again.";

/// Response text for silently dropped submissions. Spam rejections reuse
/// this generic wording so the response never reveals the honeypot.
const GENERIC_REJECTION: &str = "Unable to send your message right now. Please try again later.";

/// Result of one submission attempt
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// The persisted message, when the attempt was accepted
    pub stored: Option<StoredMessage>,
    /// Feedback to show the visitor
    pub notification: Notification,
}

impl SubmissionOutcome {
    /// Whether the message reached the store
    pub fn accepted(&self) -> bool {
        self.stored.is_some()
    }

    fn rejected(notification: Notification) -> Self {
        Self {
            stored: None,
            notification,
        }
    }
}

/// Gatekeeper in front of the message store
pub struct SubmissionPipeline {
    store: Arc<dyn MessageStore>,
    slot: Arc<dyn ClientSlot>,
    config: RateLimitConfig,
}

impl SubmissionPipeline {
    /// Create a pipeline with the default rate limits
    pub fn new(store: Arc<dyn MessageStore>, slot: Arc<dyn ClientSlot>) -> Self {
        Self::with_config(store, slot, RateLimitConfig::default())
    }

    /// Create a pipeline with explicit rate limits
    pub fn with_config(
        store: Arc<dyn MessageStore>,
        slot: Arc<dyn ClientSlot>,
        config: RateLimitConfig,
    ) -> Self {
        Self {
            store,
            slot,
            config,
        }
    }

    /// Run a submission attempt at the current wall-clock time
    pub async fn submit(&self, submission: ContactSubmission) -> SubmissionOutcome {
        self.submit_at(chrono::Utc::now().timestamp_millis(), submission)
            .await
    }

    /// Run a submission attempt at an explicit timestamp
    pub async fn submit_at(&self, now_ms: i64, submission: ContactSubmission) -> SubmissionOutcome {
        if let Err(issue) = submission.validate() {
            return SubmissionOutcome::rejected(Notification::warning(issue.message()));
        }

        if honeypot::is_spam(&submission) {
            info!("Honeypot tripped, dropping submission");
            return SubmissionOutcome::rejected(Notification::warning(GENERIC_REJECTION));
        }

        let stored_record = self.load_record().await;
        let pending = match evaluate(now_ms, stored_record.as_ref(), &self.config) {
            Verdict::Allow(pending) => pending,
            Verdict::Deny(DenyReason::TooSoon { retry_after_secs }) => {
                return SubmissionOutcome::rejected(Notification::warning(format!(
                    "Please wait {} seconds before sending another message.",
                    retry_after_secs
                )));
            }
            Verdict::Deny(DenyReason::DailyCapReached) => {
                return SubmissionOutcome::rejected(Notification::warning(
                    "Daily message limit reached. Please try again tomorrow.",
                ));
            }
        };

        let new_message = NewMessage {
            name: submission.name,
            email: submission.email,
            message: submission.message,
        };
        let stored = match self.store.insert(new_message).await {
            Ok(stored) => stored,
            Err(e) => {
                error!("Message write failed: {}", e);
                return SubmissionOutcome::rejected(Notification::error(SEND_FAILED));
            }
        };

        self.persist_record(&pending).await;
        info!("Contact submission accepted: {}", stored.id);
        SubmissionOutcome {
            stored: Some(stored),
            notification: Notification::success(SENT_OK),
        }
    }

    /// Current limiter record, for operator inspection.
    ///
    /// Unlike the submission path this surfaces corrupt records as errors
    /// instead of discarding them.
    pub async fn limiter_state(&self) -> crate::Result<Option<RateLimitRecord>> {
        match self.slot.read(RATE_LIMIT_SLOT_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Read the persisted record, treating any failure as absent
    async fn load_record(&self) -> Option<RateLimitRecord> {
        match self.slot.read(RATE_LIMIT_SLOT_KEY).await {
            Ok(Some(raw)) => parse_record(&raw),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read rate-limit record: {}", e);
                None
            }
        }
    }

    /// Persist the carried record. The message is already stored, so a
    /// persistence failure only loosens future limiting.
    async fn persist_record(&self, record: &RateLimitRecord) {
        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode rate-limit record: {}", e);
                return;
            }
        };
        if let Err(e) = self.slot.write(RATE_LIMIT_SLOT_KEY, &raw).await {
            warn!("Failed to persist rate-limit record: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::{Local, TimeZone};
    use storage::{MemoryMessageStore, MemorySlot};

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello from the demo page".to_string(),
            website: String::new(),
        }
    }

    fn local_ms(hour: u32, min: u32, sec: u32) -> i64 {
        Local
            .with_ymd_and_hms(2025, 1, 15, hour, min, sec)
            .single()
            .unwrap()
            .timestamp_millis()
    }

    fn pipeline() -> (SubmissionPipeline, Arc<MemoryMessageStore>, Arc<MemorySlot>) {
        let store = Arc::new(MemoryMessageStore::new());
        let slot = Arc::new(MemorySlot::new());
        let pipeline = SubmissionPipeline::new(store.clone(), slot.clone());
        (pipeline, store, slot)
    }

    struct FailingStore;

    #[async_trait]
    impl MessageStore for FailingStore {
        async fn insert(&self, _message: NewMessage) -> storage::Result<StoredMessage> {
            Err(storage::StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }

        async fn list(&self) -> storage::Result<Vec<StoredMessage>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_accepted_submission_stores_and_records() {
        let (pipeline, store, slot) = pipeline();

        let outcome = pipeline.submit_at(local_ms(12, 0, 0), submission()).await;
        assert!(outcome.accepted());
        assert_eq!(outcome.notification, Notification::success(SENT_OK));
        assert_eq!(store.list().await.unwrap().len(), 1);

        let raw = slot.read(RATE_LIMIT_SLOT_KEY).await.unwrap().unwrap();
        let record: RateLimitRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.day_count, 1);
        assert_eq!(record.last_submit_ms, local_ms(12, 0, 0));
    }

    #[tokio::test]
    async fn test_honeypot_drops_before_store_and_limiter() {
        let (pipeline, store, slot) = pipeline();

        let mut spam = submission();
        spam.website = "https://spam.example".to_string();

        let outcome = pipeline.submit_at(local_ms(12, 0, 0), spam).await;
        assert!(!outcome.accepted());
        assert_eq!(outcome.notification, Notification::warning(GENERIC_REJECTION));
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(slot.read(RATE_LIMIT_SLOT_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rapid_second_attempt_is_rejected() {
        let (pipeline, store, _slot) = pipeline();

        let first = pipeline.submit_at(local_ms(12, 0, 0), submission()).await;
        assert!(first.accepted());

        let second = pipeline.submit_at(local_ms(12, 0, 30), submission()).await;
        assert!(!second.accepted());
        assert_eq!(
            second.notification,
            Notification::warning("Please wait 30 seconds before sending another message.")
        );
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_daily_cap_rejects_with_guidance() {
        let store = Arc::new(MemoryMessageStore::new());
        let slot = Arc::new(MemorySlot::new());
        let pipeline = SubmissionPipeline::with_config(
            store.clone(),
            slot.clone(),
            RateLimitConfig {
                min_interval_ms: 0,
                max_per_day: 2,
            },
        );

        assert!(pipeline.submit_at(local_ms(9, 0, 0), submission()).await.accepted());
        assert!(pipeline.submit_at(local_ms(10, 0, 0), submission()).await.accepted());

        let third = pipeline.submit_at(local_ms(11, 0, 0), submission()).await;
        assert!(!third.accepted());
        assert_eq!(
            third.notification,
            Notification::warning("Daily message limit reached. Please try again tomorrow.")
        );
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_limiter_untouched() {
        let slot = Arc::new(MemorySlot::new());

        // Seed the slot through a working pipeline sharing the same slot
        let working = SubmissionPipeline::new(Arc::new(MemoryMessageStore::new()), slot.clone());
        assert!(working.submit_at(local_ms(9, 0, 0), submission()).await.accepted());
        let seeded = slot.read(RATE_LIMIT_SLOT_KEY).await.unwrap();

        let failing = SubmissionPipeline::new(Arc::new(FailingStore), slot.clone());
        let outcome = failing.submit_at(local_ms(12, 0, 0), submission()).await;
        assert!(!outcome.accepted());
        assert_eq!(outcome.notification, Notification::error(SEND_FAILED));
        assert_eq!(slot.read(RATE_LIMIT_SLOT_KEY).await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_the_store() {
        let (pipeline, store, _slot) = pipeline();

        let mut blank = submission();
        blank.name = "   ".to_string();

        let outcome = pipeline.submit_at(local_ms(12, 0, 0), blank).await;
        assert!(!outcome.accepted());
        assert_eq!(
            outcome.notification,
            Notification::warning("Please tell us your name.")
        );
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_record_fails_open() {
        let (pipeline, _store, slot) = pipeline();
        slot.write(RATE_LIMIT_SLOT_KEY, "{ not json").await.unwrap();

        let outcome = pipeline.submit_at(local_ms(12, 0, 0), submission()).await;
        assert!(outcome.accepted());

        let raw = slot.read(RATE_LIMIT_SLOT_KEY).await.unwrap().unwrap();
        let record: RateLimitRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.day_count, 1);
    }

    #[tokio::test]
    async fn test_limiter_state_surfaces_corruption() {
        let (pipeline, _store, slot) = pipeline();

        assert_eq!(pipeline.limiter_state().await.unwrap(), None);

        slot.write(RATE_LIMIT_SLOT_KEY, "{ not json").await.unwrap();
        assert!(pipeline.limiter_state().await.is_err());

        let _ = pipeline.submit_at(local_ms(12, 0, 0), submission()).await;
        assert!(pipeline.limiter_state().await.unwrap().is_some());
    }
}
