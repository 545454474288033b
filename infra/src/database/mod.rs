//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management and migrations
//! - Repository implementations for the contact change workflow

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{
    MySqlAuditLogRepository, MySqlChangeRequestRepository, MySqlRateLimitRepository,
    MySqlUserRepository,
};
