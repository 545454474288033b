//! Shared utilities and common types for WedLink server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - Error response structures and result codes
//! - Utility functions (email and phone normalization, masking)
//! - Language preference for rendered notifications

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, ContactChangeConfig, DatabaseConfig, Environment,
    LoggingConfig, NotificationConfig, ProviderConfig, ProviderKind, RateLimitConfig,
    ServerConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, Language, ServiceHealth};
pub use utils::{email, phone, validation};
