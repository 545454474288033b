//! Notification providers
//!
//! Concrete delivery channels for confirmation messages. Each implements
//! [`NotificationProvider`] from `wl_core`; ordering and fallback belong to
//! the core dispatcher.

pub mod http_email;
pub mod log_email;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use tracing::{info, warn};

use wl_core::services::NotificationProvider;
use wl_shared::{NotificationConfig, ProviderKind};

pub use http_email::HttpEmailProvider;
pub use log_email::LogEmailProvider;

/// Build the provider list from configuration, in priority order
///
/// Disabled entries are skipped. Misconfigured entries are skipped with a
/// warning so one bad entry does not take the others down.
pub fn create_providers(config: &NotificationConfig) -> Vec<Arc<dyn NotificationProvider>> {
    let sender = config.sender();
    let mut providers: Vec<Arc<dyn NotificationProvider>> = Vec::new();

    for entry in config.providers.iter().filter(|p| p.enabled) {
        match entry.kind {
            ProviderKind::Log => providers.push(Arc::new(LogEmailProvider::new(&entry.name))),
            ProviderKind::Http => {
                let (Some(endpoint), Some(api_key)) = (&entry.endpoint, &entry.api_key) else {
                    warn!(
                        provider = %entry.name,
                        "HTTP provider needs both endpoint and api_key, skipping"
                    );
                    continue;
                };
                match HttpEmailProvider::new(&entry.name, endpoint, api_key, &sender) {
                    Ok(provider) => providers.push(Arc::new(provider)),
                    Err(e) => warn!(
                        provider = %entry.name,
                        error = %e,
                        "Failed to initialize HTTP provider, skipping"
                    ),
                }
            }
        }
    }

    info!(
        providers = ?providers.iter().map(|p| p.name().to_string()).collect::<Vec<_>>(),
        "Notification providers configured"
    );
    providers
}
