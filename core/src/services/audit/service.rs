//! Audit service for recording contact change and rate limit events.
//!
//! Audit writes never fail the calling workflow: a failed write is logged
//! and the workflow carries on.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use wl_shared::utils::{email::mask_email, phone::mask_phone_number};

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::entities::change_request::ChangeRequest;
use crate::errors::{DenialReason, DomainResult};
use crate::repositories::AuditLogRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Whether to run audit writes in a background task
    pub async_writes: bool,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self { async_writes: true }
    }
}

/// Service for writing the audit trail
pub struct AuditService<R>
where
    R: AuditLogRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R> AuditService<R>
where
    R: AuditLogRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    pub async fn log_change_requested(&self, request: &ChangeRequest, provider: &str) {
        let log = AuditLog::new(AuditEventType::ContactChangeRequested, request.user_id)
            .with_request(request.id)
            .with_event_data(json!({
                "fields": request.fields(),
                "new_email": request.new_email.as_deref().map(mask_email),
                "new_phone": request.new_phone.as_deref().map(mask_phone_number),
                "provider": provider,
                "expires_at": request.expires_at,
            }));
        self.write_log(log).await;
    }

    pub async fn log_delivery_failed(&self, request: &ChangeRequest, failed_providers: &[String]) {
        let log = AuditLog::new(AuditEventType::ContactChangeDeliveryFailed, request.user_id)
            .with_request(request.id)
            .with_event_data(json!({ "failed_providers": failed_providers }));
        self.write_log(log).await;
    }

    pub async fn log_change_confirmed(&self, request: &ChangeRequest) {
        let log = AuditLog::new(AuditEventType::ContactChangeConfirmed, request.user_id)
            .with_request(request.id)
            .with_event_data(json!({ "fields": request.fields() }));
        self.write_log(log).await;
    }

    pub async fn log_change_cancelled(&self, user_id: Uuid) {
        self.write_log(AuditLog::new(AuditEventType::ContactChangeCancelled, user_id))
            .await;
    }

    pub async fn log_rate_limit_exceeded(
        &self,
        user_id: Uuid,
        reason: DenialReason,
        wait_minutes: i64,
    ) {
        let log = AuditLog::new(AuditEventType::RateLimitExceeded, user_id).with_event_data(
            json!({ "reason": reason.as_str(), "wait_minutes": wait_minutes }),
        );
        self.write_log(log).await;
    }

    pub async fn log_rate_limit_reset(&self, user_id: Uuid, actor: &str, existed: bool) {
        let log = AuditLog::new(AuditEventType::RateLimitReset, user_id)
            .with_actor(actor)
            .with_event_data(json!({ "record_existed": existed }));
        self.write_log(log).await;
    }

    pub async fn log_rate_limit_blocked(&self, user_id: Uuid, actor: &str, until: DateTime<Utc>) {
        let log = AuditLog::new(AuditEventType::RateLimitBlocked, user_id)
            .with_actor(actor)
            .with_event_data(json!({ "blocked_until": until }));
        self.write_log(log).await;
    }

    /// Get recent audit logs for a user
    pub async fn get_user_audit_logs(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> DomainResult<Vec<AuditLog>> {
        self.repository.find_by_user(user_id, limit).await
    }

    async fn write_log(&self, audit_log: AuditLog) {
        if self.config.async_writes {
            let repository = Arc::clone(&self.repository);
            task::spawn(async move {
                if let Err(e) = repository.create(&audit_log).await {
                    tracing::warn!(
                        error = %e,
                        event_type = audit_log.event_type.as_str(),
                        "Failed to write audit log"
                    );
                }
            });
        } else if let Err(e) = self.repository.create(&audit_log).await {
            tracing::warn!(
                error = %e,
                event_type = audit_log.event_type.as_str(),
                "Failed to write audit log"
            );
        }
    }
}
