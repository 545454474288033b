//! Rate limit decisions and usage.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::DenialReason;

/// Outcome of `RateLimitGuard::check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Denied { reason: DenialReason, wait_minutes: i64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Quota usage for display, e.g. "2 of 3 requests used today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitUsage {
    pub used: u32,
    pub limit: u32,
    pub resets_at: DateTime<Utc>,
}

impl RateLimitUsage {
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}
