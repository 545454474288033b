//! The provider capability implemented by every delivery channel.

use async_trait::async_trait;

use crate::domain::value_objects::notification::NotificationJob;
use crate::errors::ProviderError;

/// One external delivery channel
///
/// A provider makes a single attempt per call; the dispatcher owns ordering,
/// timeouts and fallback.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Name used in logs and receipts
    fn name(&self) -> &str;

    /// Deliver a rendered message
    ///
    /// # Returns
    /// * `Ok(Some(id))` - Accepted, with the provider's message id
    /// * `Ok(None)` - Accepted, provider returned no id
    /// * `Err(ProviderError)` - Not accepted
    async fn send(&self, job: &NotificationJob) -> Result<Option<String>, ProviderError>;
}
