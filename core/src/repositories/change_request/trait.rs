//! Change request repository trait defining the interface for pending request persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::change_request::ChangeRequest;
use crate::errors::DomainError;

/// Repository trait for ChangeRequest persistence
///
/// Implementations must guarantee that a user never has more than one
/// request that is unverified and unexpired, even when two `create` calls
/// race; the losing call fails with `ContactChangeError::RequestAlreadyPending`.
#[async_trait]
pub trait ChangeRequestRepository: Send + Sync {
    /// Persist a new pending request
    ///
    /// Expired unverified requests of the same user are purged first.
    ///
    /// # Returns
    /// * `Ok(())` - Request stored
    /// * `Err(DomainError::ContactChange(RequestAlreadyPending))` - An active request exists
    /// * `Err(DomainError::Internal)` - Storage failure
    async fn create(&self, request: &ChangeRequest) -> Result<(), DomainError>;

    /// Find the user's request that is unverified and not expired at `now`
    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<ChangeRequest>, DomainError>;

    /// Find a request by the SHA-256 hash of its token, whatever its state
    async fn find_by_token_hash(&self, token_hash: &str)
        -> Result<Option<ChangeRequest>, DomainError>;

    /// Flip `verified` from false to true while the request is unexpired at `now`
    ///
    /// A verified request can no longer be cancelled, so this claims the
    /// request for the caller before the profile is touched.
    ///
    /// # Returns
    /// * `Ok(true)` - This call marked the request verified
    /// * `Ok(false)` - The request is already verified, expired or gone
    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Flip `verified` back to false after the profile update failed
    ///
    /// Returns whether the request was reverted.
    async fn revert_verified(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete the user's unverified request with the given token hash
    ///
    /// Returns whether a row was deleted; deleting a missing request is not an error.
    async fn delete_pending(&self, user_id: Uuid, token_hash: &str) -> Result<bool, DomainError>;

    /// Delete every request with `expires_at <= now`, verified or not
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
