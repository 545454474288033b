//! Audit log entity for recording contact change and rate limit events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Events written to the audit trail
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    // Contact change workflow
    ContactChangeRequested,
    ContactChangeDeliveryFailed,
    ContactChangeConfirmed,
    ContactChangeCancelled,

    // Rate limiting
    RateLimitExceeded,
    RateLimitReset,
    RateLimitBlocked,
}

impl AuditEventType {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContactChangeRequested => "CONTACT_CHANGE_REQUESTED",
            Self::ContactChangeDeliveryFailed => "CONTACT_CHANGE_DELIVERY_FAILED",
            Self::ContactChangeConfirmed => "CONTACT_CHANGE_CONFIRMED",
            Self::ContactChangeCancelled => "CONTACT_CHANGE_CANCELLED",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::RateLimitReset => "RATE_LIMIT_RESET",
            Self::RateLimitBlocked => "RATE_LIMIT_BLOCKED",
        }
    }

    /// Administrative bypasses of the normal request flow
    pub fn is_administrative(&self) -> bool {
        matches!(self, Self::RateLimitReset | Self::RateLimitBlocked)
    }
}

impl std::str::FromStr for AuditEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONTACT_CHANGE_REQUESTED" => Ok(Self::ContactChangeRequested),
            "CONTACT_CHANGE_DELIVERY_FAILED" => Ok(Self::ContactChangeDeliveryFailed),
            "CONTACT_CHANGE_CONFIRMED" => Ok(Self::ContactChangeConfirmed),
            "CONTACT_CHANGE_CANCELLED" => Ok(Self::ContactChangeCancelled),
            "RATE_LIMIT_EXCEEDED" => Ok(Self::RateLimitExceeded),
            "RATE_LIMIT_RESET" => Ok(Self::RateLimitReset),
            "RATE_LIMIT_BLOCKED" => Ok(Self::RateLimitBlocked),
            other => Err(format!("Unknown audit event type: {}", other)),
        }
    }
}

/// One entry in the audit trail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    /// Unique identifier for the log entry
    pub id: Uuid,

    pub event_type: AuditEventType,

    /// User the event concerns
    pub user_id: Uuid,

    /// Who performed an administrative action
    pub actor: Option<String>,

    /// Related change request, if any
    pub request_id: Option<Uuid>,

    /// Additional event data (masked values only)
    pub event_data: Option<JsonValue>,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Create a new audit log entry
    pub fn new(event_type: AuditEventType, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            user_id,
            actor: None,
            request_id: None,
            event_data: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_request(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_event_data(mut self, data: JsonValue) -> Self {
        self.event_data = Some(data);
        self
    }
}
