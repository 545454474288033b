//! Dependency health checks served by the `/health` endpoint.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use wl_shared::ServiceHealth;

use crate::InfrastructureError;

/// A backing service that can report whether it is reachable
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Key under which the result is reported
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<bool, InfrastructureError>;
}

#[cfg(feature = "mysql")]
#[async_trait]
impl HealthCheck for crate::database::DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<bool, InfrastructureError> {
        self.health_check().await
    }
}

#[cfg(feature = "redis-cache")]
#[async_trait]
impl HealthCheck for crate::cache::RedisClient {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn check(&self) -> Result<bool, InfrastructureError> {
        self.health_check().await
    }
}

/// Run every check in turn and collect the results by name
///
/// Error details are logged, not returned; the endpoint is unauthenticated.
pub async fn check_all(checks: &[Arc<dyn HealthCheck>]) -> HashMap<String, ServiceHealth> {
    let mut services = HashMap::with_capacity(checks.len());

    for check in checks {
        let started = Instant::now();
        let outcome = check.check().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let health = match outcome {
            Ok(true) => ServiceHealth::healthy(elapsed_ms),
            Ok(false) => ServiceHealth::unhealthy("unexpected response", elapsed_ms),
            Err(e) => {
                warn!(service = check.name(), error = %e, "Health check failed");
                ServiceHealth::unhealthy("unreachable", elapsed_ms)
            }
        };
        services.insert(check.name().to_string(), health);
    }

    services
}
