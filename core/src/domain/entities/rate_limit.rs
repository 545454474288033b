//! Per-user daily rate limit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request counter for one user within one calendar-day window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    pub user_id: Uuid,

    /// Midnight (in the reference timezone) that opened the tracked window
    pub window_start: DateTime<Utc>,

    /// Requests counted in the tracked window
    pub requests_used_today: u32,

    /// While in the future, every request is denied regardless of count
    pub blocked_until: Option<DateTime<Utc>>,
}

impl RateLimitRecord {
    /// A fresh record with no requests counted
    pub fn new(user_id: Uuid, window_start: DateTime<Utc>) -> Self {
        Self {
            user_id,
            window_start,
            requests_used_today: 0,
            blocked_until: None,
        }
    }

    /// Requests counted against the window starting at `window_start`
    ///
    /// A record from an earlier window counts as zero; the stored counter
    /// is only reset when the next request is recorded.
    pub fn used_in(&self, window_start: DateTime<Utc>) -> u32 {
        if self.window_start >= window_start {
            self.requests_used_today
        } else {
            0
        }
    }

    pub fn is_blocked(&self, now: DateTime<Utc>) -> bool {
        matches!(self.blocked_until, Some(until) if until > now)
    }

    /// Count one request, rolling the window over when it has moved on
    pub fn increment(&mut self, window_start: DateTime<Utc>) {
        if self.window_start < window_start {
            self.window_start = window_start;
            self.requests_used_today = 0;
        }
        self.requests_used_today = self.requests_used_today.saturating_add(1);
    }
}
