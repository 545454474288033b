//! Contact change request orchestration.

use chrono::Duration;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use wl_shared::utils::email::mask_email;
use wl_shared::{ContactChangeConfig, Language};

use crate::domain::entities::change_request::{ChangeRequest, PendingRequestSummary};
use crate::domain::entities::user::UserContact;
use crate::domain::value_objects::contact::{ContactChangeInput, ContactUpdate};
use crate::domain::value_objects::notification::NotificationKind;
use crate::domain::value_objects::token::{hash_token, VerificationToken};
use crate::errors::{ContactChangeError, DomainError, DomainResult};
use crate::repositories::{
    AuditLogRepository, ChangeRequestRepository, RateLimitRepository, UserRepository,
};
use crate::services::audit::AuditService;
use crate::services::clock::Clock;
use crate::services::notification::{render, NotificationDispatcher, TemplateData};
use crate::services::rate_limit::{RateLimitDecision, RateLimitGuard};

use super::types::{ConfirmationSent, RequestOutcome};

/// Orchestrates contact change requests
///
/// Every step before the insert is a gate without side effects. Quota is
/// only consumed once the confirmation has been delivered.
pub struct ChangeRequestManager<C, U, R, A>
where
    C: ChangeRequestRepository,
    U: UserRepository,
    R: RateLimitRepository,
    A: AuditLogRepository,
{
    requests: Arc<C>,
    users: Arc<U>,
    rate_limiter: Arc<RateLimitGuard<R>>,
    dispatcher: Arc<NotificationDispatcher>,
    audit: Arc<AuditService<A>>,
    clock: Arc<dyn Clock>,
    config: ContactChangeConfig,
}

impl<C, U, R, A> ChangeRequestManager<C, U, R, A>
where
    C: ChangeRequestRepository,
    U: UserRepository,
    R: RateLimitRepository,
    A: AuditLogRepository + 'static,
{
    pub fn new(
        requests: Arc<C>,
        users: Arc<U>,
        rate_limiter: Arc<RateLimitGuard<R>>,
        dispatcher: Arc<NotificationDispatcher>,
        audit: Arc<AuditService<A>>,
        clock: Arc<dyn Clock>,
        config: ContactChangeConfig,
    ) -> Self {
        Self {
            requests,
            users,
            rate_limiter,
            dispatcher,
            audit,
            clock,
            config,
        }
    }

    /// Start a contact change for a user
    ///
    /// # Returns
    /// * `Ok(RequestOutcome::ConfirmationSent)` - Link delivered, quota recorded
    /// * `Ok(RequestOutcome::NoChangesDetected)` - Nothing to change
    /// * `Err(DomainError::ContactChange(_))` - `rateLimited`, `valueAlreadyTaken`,
    ///   `requestAlreadyPending` or `deliveryFailed`
    /// * `Err(DomainError::Validation)` - Malformed input
    pub async fn request_change(
        &self,
        user_id: Uuid,
        input: &ContactChangeInput,
        language: Language,
    ) -> DomainResult<RequestOutcome> {
        let user = self.load_user(user_id).await?;

        let update = ContactUpdate::between(&user, input)?;
        if update.is_empty() {
            info!(user_id = %user_id, "Contact change submitted without changes");
            return Ok(RequestOutcome::NoChangesDetected);
        }
        let (recipient, kind) = resolve_recipient(&user, &update)?;

        if let RateLimitDecision::Denied {
            reason,
            wait_minutes,
        } = self.rate_limiter.check(user_id).await?
        {
            warn!(
                user_id = %user_id,
                reason = reason.as_str(),
                wait_minutes = wait_minutes,
                event = "contact_change_rate_limited",
                "Contact change request denied by rate limit"
            );
            self.audit
                .log_rate_limit_exceeded(user_id, reason, wait_minutes)
                .await;
            return Err(ContactChangeError::RateLimited {
                reason,
                wait_minutes,
            }
            .into());
        }

        for (field, value) in update.values() {
            if self.users.exists_with_email_or_phone(value, user_id).await? {
                info!(user_id = %user_id, field = field.as_str(), "Requested contact value already taken");
                return Err(ContactChangeError::ValueAlreadyTaken { field }.into());
            }
        }

        let now = self.clock.now();
        if let Some(existing) = self.requests.find_active_by_user(user_id, now).await? {
            return Err(ContactChangeError::RequestAlreadyPending {
                summary: existing.summary(),
            }
            .into());
        }

        let token = VerificationToken::generate(self.config.token_bytes);
        let request = ChangeRequest::new(
            &user,
            &update,
            token.hash(),
            now,
            Duration::minutes(self.config.token_ttl_minutes),
        );
        self.requests.create(&request).await?;

        let data = TemplateData {
            display_name: user.display_name.clone(),
            confirmation_url: self.config.confirmation_url(token.as_str()),
            new_email: update.new_email.clone(),
            new_phone: update.new_phone.clone(),
            expires_in_hours: (self.config.token_ttl_minutes + 59) / 60,
        };
        let job = render(kind, language, &data).into_job(recipient.as_str(), kind);

        match self.dispatcher.send(job).await {
            Ok(receipt) => {
                let usage = match self.rate_limiter.record(user_id).await {
                    Ok(record) => Some(self.rate_limiter.usage_of(&record)),
                    Err(e) => {
                        error!(user_id = %user_id, error = %e, "Failed to record rate limit usage");
                        None
                    }
                };

                info!(
                    user_id = %user_id,
                    request_id = %request.id,
                    provider = %receipt.provider,
                    event = "contact_change_requested",
                    "Contact change confirmation sent"
                );
                self.audit
                    .log_change_requested(&request, &receipt.provider)
                    .await;

                Ok(RequestOutcome::ConfirmationSent(ConfirmationSent {
                    request_id: request.id,
                    fields: request.fields(),
                    sent_to: mask_email(&recipient),
                    expires_at: request.expires_at,
                    provider: receipt.provider,
                    usage,
                }))
            }
            Err(delivery_error) => {
                let failed: Vec<String> = delivery_error
                    .failures()
                    .iter()
                    .map(|f| f.provider.clone())
                    .collect();
                warn!(
                    user_id = %user_id,
                    request_id = %request.id,
                    error = %delivery_error,
                    event = "contact_change_delivery_failed",
                    "Contact change confirmation could not be delivered"
                );
                self.audit.log_delivery_failed(&request, &failed).await;

                Err(ContactChangeError::DeliveryFailed {
                    request_id: request.id,
                }
                .into())
            }
        }
    }

    /// Withdraw the user's pending request identified by its token
    ///
    /// Idempotent: returns `Ok(false)` when nothing matched.
    pub async fn cancel_pending_request(&self, user_id: Uuid, token: &str) -> DomainResult<bool> {
        let deleted = self
            .requests
            .delete_pending(user_id, &hash_token(token.trim()))
            .await?;

        if deleted {
            info!(user_id = %user_id, event = "contact_change_cancelled", "Contact change cancelled");
            self.audit.log_change_cancelled(user_id).await;
        }
        Ok(deleted)
    }

    /// The user's active request, if any
    pub async fn pending_request(&self, user_id: Uuid) -> DomainResult<Option<PendingRequestSummary>> {
        let now = self.clock.now();
        Ok(self
            .requests
            .find_active_by_user(user_id, now)
            .await?
            .map(|request| request.summary()))
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<UserContact> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "user".to_string(),
            })
    }
}

/// Where the confirmation link goes and which template it uses
///
/// A new email is confirmed at the new address; a phone-only change is
/// confirmed through the email already on the account.
fn resolve_recipient(
    user: &UserContact,
    update: &ContactUpdate,
) -> DomainResult<(String, NotificationKind)> {
    if let Some(new_email) = &update.new_email {
        return Ok((new_email.clone(), NotificationKind::EmailChangeConfirmation));
    }
    match &user.email {
        Some(current) => Ok((current.clone(), NotificationKind::PhoneChangeConfirmation)),
        None => Err(DomainError::validation(
            "An email address is required to confirm a phone number change",
        )),
    }
}
