//! Log-only email provider for development.
//!
//! Writes the masked recipient and the subject to the log and reports
//! success. The confirmation link is logged at debug level so a developer
//! can follow it locally.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};
use uuid::Uuid;

use wl_core::domain::value_objects::notification::NotificationJob;
use wl_core::errors::ProviderError;
use wl_core::services::NotificationProvider;
use wl_shared::utils::email::mask_email;

/// Provider that logs messages instead of sending them
pub struct LogEmailProvider {
    name: String,
    /// Counter for tracking number of messages "sent"
    message_count: AtomicU64,
}

impl LogEmailProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message_count: AtomicU64::new(0),
        }
    }

    /// Get the total number of messages logged
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationProvider for LogEmailProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, job: &NotificationJob) -> Result<Option<String>, ProviderError> {
        let message_id = format!("log-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            provider = %self.name,
            recipient = %mask_email(&job.recipient),
            kind = job.kind.as_str(),
            subject = %job.subject,
            message_id = %message_id,
            "Email logged instead of sent"
        );
        debug!(body = %job.text_body, "Logged email body");

        Ok(Some(message_id))
    }
}
