//! Domain entities representing core business objects.

pub mod audit;
pub mod change_request;
pub mod rate_limit;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use audit::{AuditEventType, AuditLog};
pub use change_request::{ChangeRequest, PendingRequestSummary, DEFAULT_TOKEN_TTL_MINUTES};
pub use rate_limit::RateLimitRecord;
pub use user::UserContact;
