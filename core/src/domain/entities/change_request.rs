//! Contact change request entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::UserContact;
use crate::domain::value_objects::contact::{ContactField, ContactUpdate};

/// Default lifetime of a confirmation link (4 hours)
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 240;

/// A time-boxed request to change a user's email and/or phone, awaiting
/// confirmation through the emailed link
///
/// Only the SHA-256 hash of the confirmation token is kept; the raw token
/// exists solely in the delivered URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Unique identifier for the request
    pub id: Uuid,

    /// Owner of the request
    pub user_id: Uuid,

    /// Email on the account when the request was made
    pub current_email: Option<String>,

    /// Phone on the account when the request was made
    pub current_phone: Option<String>,

    /// Requested email, if the email changes
    pub new_email: Option<String>,

    /// Requested phone, if the phone changes
    pub new_phone: Option<String>,

    /// Hex-encoded SHA-256 of the confirmation token
    pub token_hash: String,

    /// Timestamp when the request was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the link is no longer honoured
    pub expires_at: DateTime<Utc>,

    /// Set once the change has been applied
    pub verified: bool,
}

impl ChangeRequest {
    /// Create a pending request for the given update
    pub fn new(
        user: &UserContact,
        update: &ContactUpdate,
        token_hash: String,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            current_email: user.email.clone(),
            current_phone: user.phone.clone(),
            new_email: update.new_email.clone(),
            new_phone: update.new_phone.clone(),
            token_hash,
            created_at: now,
            expires_at: now + ttl,
            verified: false,
        }
    }

    /// An expired request is terminal, whether or not it was verified
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Pending and still inside its lifetime
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.verified && !self.is_expired(now)
    }

    /// Fields this request changes
    pub fn fields(&self) -> Vec<ContactField> {
        let mut fields = Vec::with_capacity(2);
        if self.new_email.is_some() {
            fields.push(ContactField::Email);
        }
        if self.new_phone.is_some() {
            fields.push(ContactField::Phone);
        }
        fields
    }

    /// Changed fields paired with their requested values
    pub fn changes(&self) -> Vec<(ContactField, &str)> {
        let mut changes = Vec::with_capacity(2);
        if let Some(email) = self.new_email.as_deref() {
            changes.push((ContactField::Email, email));
        }
        if let Some(phone) = self.new_phone.as_deref() {
            changes.push((ContactField::Phone, phone));
        }
        changes
    }

    /// Display summary for the "pending change" banner
    pub fn summary(&self) -> PendingRequestSummary {
        PendingRequestSummary {
            request_id: self.id,
            fields: self.fields(),
            new_email: self.new_email.clone(),
            new_phone: self.new_phone.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// What the owner of a pending request is shown about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequestSummary {
    pub request_id: Uuid,
    pub fields: Vec<ContactField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
