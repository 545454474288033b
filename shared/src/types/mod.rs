//! Type definitions shared across crates
//!
//! - `language` - Language preference for rendered notifications
//! - `response` - API response wrapper and health check payload

pub mod language;
pub mod response;

pub use language::Language;
pub use response::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
