//! Freshness policy for cached records.
//!
//! A stored row is served as-is while its retrieval timestamp is within the
//! freshness window. Older rows are refetched from the remote source and
//! overwritten; nothing is ever physically evicted.

use chrono::{DateTime, Duration, Utc};

/// Age in days after which a stored record must be refetched.
pub const STALE_AFTER_DAYS: u32 = 30;

/// Staleness rule applied to retrieval timestamps.
///
/// Defaults to [`STALE_AFTER_DAYS`]; configuration may override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    max_age: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::from_days(STALE_AFTER_DAYS)
    }
}

impl FreshnessPolicy {
    /// Create a policy with a custom maximum age.
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    /// Create a policy from a whole number of days.
    pub fn from_days(days: u32) -> Self {
        Self::new(Duration::days(i64::from(days)))
    }

    /// The maximum age a record may reach before it is stale.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Whether a record retrieved at `retrieved_at` is stale now.
    pub fn is_stale(&self, retrieved_at: DateTime<Utc>) -> bool {
        self.is_stale_at(retrieved_at, Utc::now())
    }

    /// Whether a record retrieved at `retrieved_at` is stale at `now`.
    ///
    /// The boundary is exclusive: a record exactly `max_age` old is still fresh.
    pub fn is_stale_at(&self, retrieved_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - retrieved_at > self.max_age
    }

    /// Staleness check for a stored RFC 3339 timestamp.
    ///
    /// Timestamps that cannot be parsed are treated as stale so the row gets
    /// rewritten with a well-formed value.
    pub fn is_stale_rfc3339(&self, retrieved_at: &str) -> bool {
        match DateTime::parse_from_rfc3339(retrieved_at) {
            Ok(ts) => self.is_stale(ts.with_timezone(&Utc)),
            Err(e) => {
                tracing::warn!(retrieved_at, error = %e, "unparsable retrieval timestamp, treating as stale");
                true
            }
        }
    }
}

/// Whether a record retrieved at `retrieved_at` is stale under [`STALE_AFTER_DAYS`].
pub fn is_stale(retrieved_at: DateTime<Utc>) -> bool {
    FreshnessPolicy::default().is_stale(retrieved_at)
}
