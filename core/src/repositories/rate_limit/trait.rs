//! Rate limit repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::rate_limit::RateLimitRecord;
use crate::errors::DomainError;

/// Persistence of per-user daily counters
///
/// Only `RateLimitGuard` and `RateLimitAdmin` write through this port.
#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Get the stored record for a user, whatever window it belongs to
    async fn find(&self, user_id: Uuid) -> Result<Option<RateLimitRecord>, DomainError>;

    /// Atomically count one request in the window starting at `window_start`
    ///
    /// Creates the record when absent and resets the counter when the stored
    /// window is older than `window_start`. Never denies.
    async fn increment(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError>;

    /// Set `blocked_until`, creating the record when absent
    async fn block_until(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError>;

    /// Delete the user's record; returns whether one existed
    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
