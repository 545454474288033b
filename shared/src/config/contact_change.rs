//! Contact change workflow configuration

use serde::{Deserialize, Serialize};

/// Smallest accepted token size: 16 bytes = 128 bits of entropy
pub const MIN_TOKEN_BYTES: usize = 16;

/// Largest accepted token size; 64 bytes encode to 86 URL-safe characters,
/// well inside the length confirmation links are checked against
pub const MAX_TOKEN_BYTES: usize = 64;

/// Settings for the contact change confirmation workflow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactChangeConfig {
    /// Public site URL the confirmation link is built from
    pub base_url: String,

    /// Lifetime of a pending request and its token
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// Random bytes per confirmation token
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,

    /// How often the expired-request sweep runs
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl Default for ContactChangeConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

impl ContactChangeConfig {
    /// Create a configuration for a site base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token_ttl_minutes: default_token_ttl_minutes(),
            token_bytes: default_token_bytes(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }

    /// Build the confirmation URL for a raw token
    pub fn confirmation_url(&self, token: &str) -> String {
        format!(
            "{}/verify-email-change?token={}",
            self.base_url.trim_end_matches('/'),
            token
        )
    }
}

fn default_token_ttl_minutes() -> i64 {
    240 // 4 hours
}

fn default_token_bytes() -> usize {
    32
}

fn default_cleanup_interval() -> u64 {
    900 // 15 minutes
}
