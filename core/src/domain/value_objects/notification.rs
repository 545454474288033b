//! Notification value objects handed to the dispatcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about; selects the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    EmailChangeConfirmation,
    PhoneChangeConfirmation,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::EmailChangeConfirmation => "email_change_confirmation",
            NotificationKind::PhoneChangeConfirmation => "phone_change_confirmation",
        }
    }
}

/// A fully rendered message, ready for any provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationJob {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub kind: NotificationKind,
}

/// Proof of delivery from the provider that accepted the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// Name of the provider that accepted the message
    pub provider: String,
    /// Provider-assigned message id, when the provider returns one
    pub provider_message_id: Option<String>,
    pub delivered_at: DateTime<Utc>,
}
