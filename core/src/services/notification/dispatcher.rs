//! Ordered first-success-wins notification dispatcher.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use wl_shared::utils::email::mask_email;
use wl_shared::NotificationConfig;

use crate::domain::value_objects::notification::{DeliveryReceipt, NotificationJob};
use crate::errors::{DeliveryError, ProviderError, ProviderFailure};
use crate::services::clock::Clock;

use super::provider::NotificationProvider;

/// Tries providers strictly in order, one bounded attempt each
///
/// Attempts never overlap: racing providers could deliver the same message
/// twice. A timeout counts as a failure and moves on to the next provider.
pub struct NotificationDispatcher {
    providers: Vec<Arc<dyn NotificationProvider>>,
    per_attempt_timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(
        providers: Vec<Arc<dyn NotificationProvider>>,
        per_attempt_timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            providers,
            per_attempt_timeout,
            clock,
        }
    }

    /// Dispatcher using the attempt timeout from configuration
    pub fn from_config(
        providers: Vec<Arc<dyn NotificationProvider>>,
        config: &NotificationConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            providers,
            Duration::from_millis(config.per_attempt_timeout_ms),
            clock,
        )
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Worst-case latency of one `send`: every provider timing out
    pub fn max_latency(&self) -> Duration {
        self.per_attempt_timeout * self.providers.len() as u32
    }

    /// Deliver the job through the first provider that accepts it
    ///
    /// The receipt names only the accepting provider; failures of earlier
    /// providers are logged and returned only when every provider fails.
    pub async fn send(&self, job: NotificationJob) -> Result<DeliveryReceipt, DeliveryError> {
        if self.providers.is_empty() {
            warn!(kind = job.kind.as_str(), "No notification providers configured");
            return Err(DeliveryError::NoProviders);
        }

        let recipient = mask_email(&job.recipient);
        let mut failures = Vec::new();

        for provider in &self.providers {
            let outcome = match tokio::time::timeout(self.per_attempt_timeout, provider.send(&job)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout {
                    timeout_ms: self.per_attempt_timeout.as_millis() as u64,
                }),
            };

            match outcome {
                Ok(message_id) => {
                    info!(
                        provider = provider.name(),
                        recipient = %recipient,
                        kind = job.kind.as_str(),
                        failed_before = failures.len(),
                        event = "notification_delivered",
                        "Notification delivered"
                    );
                    return Ok(DeliveryReceipt {
                        provider: provider.name().to_string(),
                        provider_message_id: message_id,
                        delivered_at: self.clock.now(),
                    });
                }
                Err(error) => {
                    warn!(
                        provider = provider.name(),
                        recipient = %recipient,
                        error = %error,
                        event = "notification_provider_failed",
                        "Notification provider failed, trying next"
                    );
                    failures.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        error,
                    });
                }
            }
        }

        warn!(
            recipient = %recipient,
            attempts = failures.len(),
            event = "notification_failed",
            "All notification providers failed"
        );
        Err(DeliveryError::AllProvidersFailed { failures })
    }
}
