//! Repository ports for the contact change workflow.
//!
//! Each port has an in-memory mock used by tests and by local development;
//! the MySQL and Redis adapters live in `wl_infra`.

pub mod audit;
pub mod change_request;
pub mod rate_limit;
pub mod user;

pub use audit::{AuditLogRepository, MockAuditLogRepository, NoOpAuditLogRepository};
pub use change_request::{ChangeRequestRepository, MockChangeRequestRepository};
pub use rate_limit::{MockRateLimitRepository, RateLimitRepository};
pub use user::{MockUserRepository, UserRepository};
