//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Backing store for rate-limit records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitStore {
    /// Rows in the relational database
    Database,
    /// Hashes in Redis, expiring at the window boundary
    Redis,
}

/// Contact change rate limiting configuration
///
/// The window is a calendar day in a fixed reference timezone, so the
/// count resets at local midnight rather than 24h after the first request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max contact change requests per user per day
    pub daily_limit: u32,

    /// Offset of the reference timezone from UTC, in minutes (IST = 330)
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_minutes: i32,

    /// Where rate-limit records are persisted
    #[serde(default = "default_store")]
    pub store: RateLimitStore,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            daily_limit: 3,
            timezone_offset_minutes: default_timezone_offset(),
            store: default_store(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            daily_limit: 20,
            ..Default::default()
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }

    /// Set the daily limit
    pub fn with_daily_limit(mut self, limit: u32) -> Self {
        self.daily_limit = limit;
        self
    }
}

fn default_enabled() -> bool {
    true
}

fn default_timezone_offset() -> i32 {
    330 // UTC+05:30
}

fn default_store() -> RateLimitStore {
    RateLimitStore::Database
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.daily_limit, 3);
        assert_eq!(config.timezone_offset_minutes, 330);
        assert_eq!(config.store, RateLimitStore::Database);
    }

    #[test]
    fn test_development_is_more_lenient() {
        assert!(RateLimitConfig::development().daily_limit > RateLimitConfig::production().daily_limit);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RateLimitConfig = serde_json::from_str(r#"{"daily_limit": 5}"#).unwrap();
        assert_eq!(config.daily_limit, 5);
        assert!(config.enabled);
        assert_eq!(config.timezone_offset_minutes, 330);
    }
}
