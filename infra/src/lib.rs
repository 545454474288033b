//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the WedLink server,
//! following Clean Architecture principles. It provides concrete
//! implementations of the ports defined in `wl_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repositories using SQLx, schema in `migrations/`
//! - **Cache**: Redis client and the Redis-backed rate limit store
//! - **Notification**: HTTP and log email providers
//! - **Health**: reachability checks for the database and Redis
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis rate limit store (default)

// Re-export core types for convenience
pub use wl_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and the Redis rate limit store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Notification providers - external email delivery
pub mod notification;

/// Dependency health checks
pub mod health;

/// Configuration types used by the infrastructure layer
pub mod config {
    pub use wl_shared::config::{CacheConfig, DatabaseConfig, NotificationConfig, ProviderConfig};
}

use wl_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
