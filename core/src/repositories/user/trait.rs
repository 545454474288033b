//! User directory trait: the profile collaborator of the contact change workflow.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::UserContact;
use crate::errors::DomainError;

/// Read and update access to member contact details
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user's contact details
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserContact>, DomainError>;

    /// Whether any user other than `excluding_user_id` has `value` as email or phone
    async fn exists_with_email_or_phone(
        &self,
        value: &str,
        excluding_user_id: Uuid,
    ) -> Result<bool, DomainError>;

    /// Apply a confirmed change; `None` leaves the field untouched
    async fn apply_contact_change(
        &self,
        user_id: Uuid,
        new_email: Option<&str>,
        new_phone: Option<&str>,
    ) -> Result<UserContact, DomainError>;
}
