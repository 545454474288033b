//! Bodies of the contact change endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use wl_core::domain::value_objects::contact::{ContactChangeInput, ContactField};
use wl_core::services::{AppliedChange, ConfirmationSent};

/// Body of `POST /api/v1/contact-change`
///
/// ```json
/// { "new_email": "priya.sharma@example.com", "new_phone": "+919876543210" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactChangeRequest {
    #[validate(length(min = 1, max = 254))]
    pub new_email: Option<String>,

    #[validate(length(min = 1, max = 32))]
    pub new_phone: Option<String>,
}

impl ContactChangeRequest {
    pub fn to_input(&self) -> ContactChangeInput {
        ContactChangeInput {
            new_email: self.new_email.clone(),
            new_phone: self.new_phone.clone(),
        }
    }
}

/// Data of a `confirmationSent` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationSentResponse {
    pub request_id: Uuid,
    pub fields: Vec<ContactField>,
    /// Masked address the link went to
    pub sent_to: String,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resets_at: Option<DateTime<Utc>>,
}

impl From<ConfirmationSent> for ConfirmationSentResponse {
    fn from(sent: ConfirmationSent) -> Self {
        Self {
            request_id: sent.request_id,
            fields: sent.fields,
            sent_to: sent.sent_to,
            expires_at: sent.expires_at,
            used: sent.usage.map(|u| u.used),
            limit: sent.usage.map(|u| u.limit),
            resets_at: sent.usage.map(|u| u.resets_at),
        }
    }
}

/// Body of `DELETE /api/v1/contact-change`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CancelRequest {
    #[validate(length(min = 1, max = 128))]
    pub token: String,
}

/// Query of `GET /verify-email-change`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyQuery {
    pub token: Option<String>,
}

/// Data of an `applied` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedChangeResponse {
    pub request_id: Uuid,
    pub fields: Vec<ContactField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub applied_at: DateTime<Utc>,
}

impl From<AppliedChange> for AppliedChangeResponse {
    fn from(applied: AppliedChange) -> Self {
        Self {
            request_id: applied.request_id,
            fields: applied.fields,
            email: applied.email,
            phone: applied.phone,
            applied_at: applied.applied_at,
        }
    }
}
