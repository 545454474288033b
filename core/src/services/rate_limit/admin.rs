//! Administrative bypasses of the daily limit.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::rate_limit::RateLimitRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AuditLogRepository, RateLimitRepository};
use crate::services::audit::AuditService;
use crate::services::clock::Clock;

use super::window::DailyWindow;

/// Support operations on rate limit records; every call is audit-logged
///
/// Kept apart from `RateLimitGuard` so the request workflow cannot reach it.
pub struct RateLimitAdmin<R, A>
where
    R: RateLimitRepository,
    A: AuditLogRepository,
{
    repository: Arc<R>,
    audit: Arc<AuditService<A>>,
    clock: Arc<dyn Clock>,
    window: DailyWindow,
}

impl<R, A> RateLimitAdmin<R, A>
where
    R: RateLimitRepository,
    A: AuditLogRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        audit: Arc<AuditService<A>>,
        clock: Arc<dyn Clock>,
        window: DailyWindow,
    ) -> Self {
        Self {
            repository,
            audit,
            clock,
            window,
        }
    }

    /// Delete the user's record, clearing both the count and any block
    pub async fn reset(&self, user_id: Uuid, actor: &str) -> DomainResult<bool> {
        let existed = self.repository.delete(user_id).await?;
        tracing::info!(
            user_id = %user_id,
            actor = actor,
            existed = existed,
            event = "rate_limit_reset",
            "Rate limit reset by administrator"
        );
        self.audit.log_rate_limit_reset(user_id, actor, existed).await;
        Ok(existed)
    }

    /// Deny every request from the user until `until`
    pub async fn block(
        &self,
        user_id: Uuid,
        until: DateTime<Utc>,
        actor: &str,
    ) -> DomainResult<RateLimitRecord> {
        let now = self.clock.now();
        if until <= now {
            return Err(DomainError::validation("Block must end in the future"));
        }

        let record = self
            .repository
            .block_until(user_id, self.window.window_start(now), until)
            .await?;
        tracing::info!(
            user_id = %user_id,
            actor = actor,
            blocked_until = %until,
            event = "rate_limit_blocked",
            "User blocked from contact changes"
        );
        self.audit.log_rate_limit_blocked(user_id, actor, until).await;
        Ok(record)
    }
}
