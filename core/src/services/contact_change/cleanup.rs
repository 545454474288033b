//! Periodic sweep of expired change requests.

use std::sync::Arc;
use tracing::{error, info};

use crate::errors::DomainResult;
use crate::repositories::ChangeRequestRepository;
use crate::services::clock::Clock;

/// Deletes change requests whose lifetime has ended
///
/// Verified requests are kept until they expire so that a repeated click
/// on the same link still answers `alreadyConfirmed`.
pub struct ChangeRequestCleanup<C: ChangeRequestRepository + 'static> {
    requests: Arc<C>,
    clock: Arc<dyn Clock>,
    interval_seconds: u64,
}

impl<C: ChangeRequestRepository + 'static> ChangeRequestCleanup<C> {
    pub fn new(requests: Arc<C>, clock: Arc<dyn Clock>, interval_seconds: u64) -> Self {
        Self {
            requests,
            clock,
            interval_seconds,
        }
    }

    /// Run a single cleanup cycle, returning the number of deleted requests
    pub async fn run_cleanup(&self) -> DomainResult<usize> {
        let deleted = self.requests.delete_expired(self.clock.now()).await?;
        if deleted > 0 {
            info!(deleted = deleted, "Deleted expired contact change requests");
        }
        Ok(deleted)
    }

    /// Start the cleanup as a background task
    pub fn start_background_task(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let interval = std::time::Duration::from_secs(self.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                "Change request cleanup started - will run every {} seconds",
                self.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);
            loop {
                interval_timer.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!("Change request cleanup cycle failed: {}", e);
                }
            }
        })
    }
}
