//! Submission rate limiting over a persisted counter record
//!
//! The limiter is a pure decision function: callers read the persisted
//! record, evaluate an attempt against it, and persist the carried
//! replacement only after the downstream write succeeds. Days are bucketed
//! by local midnight, so the daily cap resets when the visitor's calendar
//! does, while the quiet period keeps counting straight across midnight.

use chrono::{Local, LocalResult, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Slot key under which the record persists
pub const RATE_LIMIT_SLOT_KEY: &str = "contact_rate_limit";

/// Limits applied between successive contact submissions
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Minimum quiet period between submissions, in milliseconds
    pub min_interval_ms: i64,
    /// Submissions allowed per calendar day
    pub max_per_day: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 60_000,
            max_per_day: 5,
        }
    }
}

/// Persisted submission counters, all epoch milliseconds.
///
/// An absent record means the client never submitted. `day_start_ms`
/// identifies the local calendar day `day_count` belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    pub last_submit_ms: i64,
    pub day_start_ms: i64,
    pub day_count: u32,
}

/// Why a submission was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// Quiet period not over yet
    TooSoon { retry_after_secs: i64 },
    /// Daily cap consumed; the next slot opens on the next calendar day
    DailyCapReached,
}

/// Limiter decision for one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Allowed. The carried record reflects this attempt and must be
    /// persisted only once the downstream write succeeds.
    Allow(RateLimitRecord),
    Deny(DenyReason),
}

/// Local midnight of the calendar day containing `now_ms`.
///
/// When a daylight-saving jump makes midnight ambiguous the earlier
/// instant wins; when midnight does not exist the naive midnight is read
/// as UTC. Either way the value is deterministic per calendar date, which
/// is all the day bucketing needs.
pub fn day_start_ms(now_ms: i64) -> i64 {
    let Some(utc) = Utc.timestamp_millis_opt(now_ms).single() else {
        // Outside chrono's representable range; degenerate but stable
        return now_ms;
    };

    let midnight = utc.with_timezone(&Local).date_naive().and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => Utc.from_utc_datetime(&midnight).timestamp_millis(),
    }
}

/// Evaluate a submission attempt at `now_ms` against the stored record.
///
/// The quiet-period check runs first, then the daily cap. A missing
/// record never blocks.
pub fn evaluate(
    now_ms: i64,
    stored: Option<&RateLimitRecord>,
    config: &RateLimitConfig,
) -> Verdict {
    let day_start = day_start_ms(now_ms);

    let Some(stored) = stored else {
        return Verdict::Allow(RateLimitRecord {
            last_submit_ms: now_ms,
            day_start_ms: day_start,
            day_count: 1,
        });
    };

    let since_last = now_ms - stored.last_submit_ms;
    if since_last < config.min_interval_ms {
        let wait_ms = config.min_interval_ms - since_last;
        return Verdict::Deny(DenyReason::TooSoon {
            retry_after_secs: (wait_ms + 999) / 1000,
        });
    }

    // The stored count only carries over within the same local day
    let day_count = if stored.day_start_ms == day_start {
        stored.day_count
    } else {
        0
    };
    if day_count >= config.max_per_day {
        return Verdict::Deny(DenyReason::DailyCapReached);
    }

    Verdict::Allow(RateLimitRecord {
        last_submit_ms: now_ms,
        day_start_ms: day_start,
        day_count: day_count + 1,
    })
}

/// Parse a persisted record, treating corrupt payloads as absent.
///
/// Fail-open: a record we cannot read must not lock the form.
pub fn parse_record(raw: &str) -> Option<RateLimitRecord> {
    match serde_json::from_str(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Corrupt rate-limit record, treating as absent: {}", e);
            None
        }
    }
}
