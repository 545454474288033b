//! Per-user daily request limit.

use std::sync::Arc;
use uuid::Uuid;

use wl_shared::RateLimitConfig;

use crate::domain::entities::rate_limit::RateLimitRecord;
use crate::errors::{DenialReason, DomainResult};
use crate::repositories::RateLimitRepository;
use crate::services::clock::Clock;

use super::types::{RateLimitDecision, RateLimitUsage};
use super::window::{minutes_until, DailyWindow};

/// Decides whether a user may start another contact change today
///
/// `check` has no side effects and `record` never denies: callers check
/// before doing anything and record only once the confirmation has been
/// delivered, so rejected or undelivered requests cost no quota.
pub struct RateLimitGuard<R: RateLimitRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    window: DailyWindow,
    daily_limit: u32,
    enabled: bool,
}

impl<R: RateLimitRepository> RateLimitGuard<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, config: &RateLimitConfig) -> DomainResult<Self> {
        Ok(Self {
            repository,
            clock,
            window: DailyWindow::new(config.timezone_offset_minutes)?,
            daily_limit: config.daily_limit,
            enabled: config.enabled,
        })
    }

    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    pub fn window(&self) -> DailyWindow {
        self.window
    }

    /// Decide whether the user may make another request now
    pub async fn check(&self, user_id: Uuid) -> DomainResult<RateLimitDecision> {
        if !self.enabled {
            return Ok(RateLimitDecision::Allowed {
                remaining: self.daily_limit,
            });
        }

        let now = self.clock.now();
        let record = self.repository.find(user_id).await?;

        let Some(record) = record else {
            return Ok(RateLimitDecision::Allowed {
                remaining: self.daily_limit,
            });
        };

        if let Some(until) = record.blocked_until.filter(|until| *until > now) {
            return Ok(RateLimitDecision::Denied {
                reason: DenialReason::TemporarilyBlocked,
                wait_minutes: minutes_until(now, until),
            });
        }

        let used = record.used_in(self.window.window_start(now));
        if used >= self.daily_limit {
            return Ok(RateLimitDecision::Denied {
                reason: DenialReason::DailyLimitReached,
                wait_minutes: self.window.minutes_until_rollover(now),
            });
        }

        Ok(RateLimitDecision::Allowed {
            remaining: self.daily_limit - used,
        })
    }

    /// Count one delivered request against today's window
    pub async fn record(&self, user_id: Uuid) -> DomainResult<RateLimitRecord> {
        let now = self.clock.now();
        let record = self
            .repository
            .increment(user_id, self.window.window_start(now))
            .await?;

        tracing::debug!(
            user_id = %user_id,
            used = record.requests_used_today,
            limit = self.daily_limit,
            "Recorded contact change request"
        );
        Ok(record)
    }

    /// Current usage without counting anything
    pub async fn usage(&self, user_id: Uuid) -> DomainResult<RateLimitUsage> {
        let now = self.clock.now();
        let used = self
            .repository
            .find(user_id)
            .await?
            .map(|record| record.used_in(self.window.window_start(now)))
            .unwrap_or(0);
        Ok(self.usage_from(used))
    }

    /// Usage as reported by a record returned from `record`
    pub fn usage_of(&self, record: &RateLimitRecord) -> RateLimitUsage {
        self.usage_from(record.used_in(self.window.window_start(self.clock.now())))
    }

    fn usage_from(&self, used: u32) -> RateLimitUsage {
        RateLimitUsage {
            used,
            limit: self.daily_limit,
            resets_at: self.window.next_rollover(self.clock.now()),
        }
    }
}
