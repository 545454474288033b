//! Confirmation link handling.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::value_objects::token::{hash_token, is_well_formed};
use crate::errors::{ContactChangeError, DomainError, DomainResult};
use crate::repositories::{AuditLogRepository, ChangeRequestRepository, UserRepository};
use crate::services::audit::AuditService;
use crate::services::clock::Clock;

use super::types::AppliedChange;

/// Consumes confirmation tokens and applies the requested change
///
/// A request moves `pending -> verified` exactly once. Expired requests are
/// terminal whatever their `verified` flag says.
pub struct ConfirmationHandler<C, U, A>
where
    C: ChangeRequestRepository,
    U: UserRepository,
    A: AuditLogRepository,
{
    requests: Arc<C>,
    users: Arc<U>,
    audit: Arc<AuditService<A>>,
    clock: Arc<dyn Clock>,
}

impl<C, U, A> ConfirmationHandler<C, U, A>
where
    C: ChangeRequestRepository,
    U: UserRepository,
    A: AuditLogRepository + 'static,
{
    pub fn new(
        requests: Arc<C>,
        users: Arc<U>,
        audit: Arc<AuditService<A>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            requests,
            users,
            audit,
            clock,
        }
    }

    /// Confirm a change with the token from the emailed link
    ///
    /// The request is marked verified before the profile is written, so a
    /// concurrent cancel or sweep either wins outright or finds nothing left
    /// to delete. A failed profile update hands the request back as pending.
    ///
    /// # Returns
    /// * `Ok(AppliedChange)` - Profile updated and request marked verified
    /// * `Err(ContactChange(InvalidToken | ExpiredToken | AlreadyConfirmed))`
    /// * `Err(ContactChange(ValueAlreadyTaken))` - Another account took the value meanwhile
    /// * `Err(Internal)` - Profile update failed; the request stays pending
    pub async fn confirm(&self, token: &str) -> DomainResult<AppliedChange> {
        let token = token.trim();
        if !is_well_formed(token) {
            return Err(ContactChangeError::InvalidToken.into());
        }

        let token_hash = hash_token(token);
        let request = self
            .requests
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(ContactChangeError::InvalidToken)?;

        let now = self.clock.now();
        if request.is_expired(now) {
            info!(request_id = %request.id, "Confirmation attempted on expired request");
            return Err(ContactChangeError::ExpiredToken.into());
        }
        if request.verified {
            return Err(ContactChangeError::AlreadyConfirmed.into());
        }

        if self.users.find_by_id(request.user_id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: "user".to_string(),
            });
        }

        for (field, value) in request.changes() {
            if self
                .users
                .exists_with_email_or_phone(value, request.user_id)
                .await?
            {
                warn!(
                    request_id = %request.id,
                    field = field.as_str(),
                    "Contact value taken by another account before confirmation"
                );
                return Err(ContactChangeError::ValueAlreadyTaken { field }.into());
            }
        }

        if !self.requests.mark_verified(request.id, now).await? {
            return Err(self.lost_claim(&token_hash, now).await);
        }

        let updated = match self
            .users
            .apply_contact_change(
                request.user_id,
                request.new_email.as_deref(),
                request.new_phone.as_deref(),
            )
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                error!(
                    request_id = %request.id,
                    error = %e,
                    "Failed to apply contact change, returning request to pending"
                );
                if let Err(revert_error) = self.requests.revert_verified(request.id).await {
                    error!(
                        request_id = %request.id,
                        error = %revert_error,
                        "Failed to return request to pending"
                    );
                }
                return Err(e);
            }
        };

        info!(
            user_id = %request.user_id,
            request_id = %request.id,
            event = "contact_change_confirmed",
            "Contact change applied"
        );
        self.audit.log_change_confirmed(&request).await;

        Ok(AppliedChange {
            request_id: request.id,
            user_id: request.user_id,
            fields: request.fields(),
            email: request.new_email.as_ref().and(updated.email),
            phone: request.new_phone.as_ref().and(updated.phone),
            applied_at: now,
        })
    }

    /// Work out why the request could not be marked verified
    async fn lost_claim(&self, token_hash: &str, now: DateTime<Utc>) -> DomainError {
        match self.requests.find_by_token_hash(token_hash).await {
            // Cancelled or swept between lookup and claim
            Ok(None) => ContactChangeError::InvalidToken.into(),
            Ok(Some(current)) if current.is_expired(now) => ContactChangeError::ExpiredToken.into(),
            Ok(Some(_)) => ContactChangeError::AlreadyConfirmed.into(),
            Err(e) => e,
        }
    }
}
