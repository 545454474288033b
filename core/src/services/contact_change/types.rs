//! Types for contact change workflow results

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use wl_shared::error_codes;

use crate::domain::value_objects::contact::ContactField;
use crate::services::rate_limit::RateLimitUsage;

/// Successful outcome of `ChangeRequestManager::request_change`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    ConfirmationSent(ConfirmationSent),
    /// Nothing differs from the current details; no request was created
    NoChangesDetected,
}

impl RequestOutcome {
    /// Stable machine-readable result code
    pub fn code(&self) -> &'static str {
        match self {
            RequestOutcome::ConfirmationSent(_) => error_codes::CONFIRMATION_SENT,
            RequestOutcome::NoChangesDetected => error_codes::NO_CHANGES_DETECTED,
        }
    }
}

/// A confirmation link was created and delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationSent {
    pub request_id: Uuid,
    pub fields: Vec<ContactField>,
    /// Masked address the link was sent to
    pub sent_to: String,
    pub expires_at: DateTime<Utc>,
    /// Provider that accepted the message
    pub provider: String,
    /// Quota usage after this request; absent if it could not be recorded
    pub usage: Option<RateLimitUsage>,
}

/// A confirmed change, as applied to the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedChange {
    pub request_id: Uuid,
    pub user_id: Uuid,
    pub fields: Vec<ContactField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub applied_at: DateTime<Utc>,
}
