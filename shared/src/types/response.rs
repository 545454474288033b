//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Result code, e.g. `confirmationSent`
    pub status: String,

    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Create a response carrying data
    pub fn new(status: impl Into<String>, data: T) -> Self {
        Self {
            status: status.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    /// Create a response with only a status code
    pub fn status_only(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }
}

/// Overall or per-dependency health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health of one backing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Time the check took
    pub response_time_ms: u64,
}

impl ServiceHealth {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms,
        }
    }
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Unhealthy as soon as one backing service is
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub services: HashMap<String, ServiceHealth>,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(
        service: impl Into<String>,
        version: impl Into<String>,
        services: HashMap<String, ServiceHealth>,
    ) -> Self {
        let status = if services
            .values()
            .all(|s| s.status == HealthStatus::Healthy)
        {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            service: service.into(),
            version: version.into(),
            services,
            timestamp: Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_failing_service_makes_response_unhealthy() {
        let mut services = HashMap::new();
        services.insert("database".to_string(), ServiceHealth::healthy(3));
        assert!(HealthResponse::new("wedlink-api", "0.1.0", services.clone()).is_healthy());

        services.insert("redis".to_string(), ServiceHealth::unhealthy("unreachable", 250));
        let response = HealthResponse::new("wedlink-api", "0.1.0", services);
        assert!(!response.is_healthy());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["services"]["database"]["status"], "healthy");
        assert_eq!(json["services"]["redis"]["message"], "unreachable");
    }
}
