//! Bodies of the administrative rate limit endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wl_core::domain::entities::rate_limit::RateLimitRecord;

/// Body of `POST /api/v1/admin/rate-limits/{user_id}/block`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRequest {
    pub until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResetResponse {
    pub user_id: Uuid,
    /// Whether a record existed before the reset
    pub existed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitStateResponse {
    pub user_id: Uuid,
    pub window_start: DateTime<Utc>,
    pub requests_used_today: u32,
    pub blocked_until: Option<DateTime<Utc>>,
}

impl From<RateLimitRecord> for RateLimitStateResponse {
    fn from(record: RateLimitRecord) -> Self {
        Self {
            user_id: record.user_id,
            window_start: record.window_start,
            requests_used_today: record.requests_used_today,
            blocked_until: record.blocked_until,
        }
    }
}
