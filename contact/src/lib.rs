//! Contact form intake: validation, spam filtering, and rate limiting
//!
//! Everything a submission passes through before it reaches the message
//! store lives here. The pipeline rejects bad input with visitor-facing
//! notifications, silently drops honeypot hits, and enforces a quiet
//! period plus a daily cap backed by a persisted counter record.

pub mod error;
pub mod honeypot;
pub mod notify;
pub mod pipeline;
pub mod rate_limit;
pub mod submission;

// Re-export commonly used types
pub use error::{ContactError, Result};
pub use honeypot::is_spam;
pub use notify::{Notification, NotificationKind};
pub use pipeline::{SubmissionOutcome, SubmissionPipeline};
pub use rate_limit::{
    day_start_ms, evaluate, DenyReason, RateLimitConfig, RateLimitRecord, Verdict,
    RATE_LIMIT_SLOT_KEY,
};
pub use submission::{ContactSubmission, ValidationIssue};
