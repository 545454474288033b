//! Audit service module for recording contact change and rate limit events.

mod service;

pub use service::{AuditService, AuditServiceConfig};
