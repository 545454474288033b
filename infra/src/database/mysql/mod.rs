//! MySQL repository implementations

mod audit_repository_impl;
mod change_request_repository_impl;
mod rate_limit_repository_impl;
mod user_repository_impl;

pub use audit_repository_impl::MySqlAuditLogRepository;
pub use change_request_repository_impl::MySqlChangeRequestRepository;
pub use rate_limit_repository_impl::MySqlRateLimitRepository;
pub use user_repository_impl::MySqlUserRepository;

use uuid::Uuid;
use wl_core::domain::value_objects::contact::ContactField;
use wl_core::errors::DomainError;

/// Map a SQLx error to an internal domain error with context
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", column, e),
    })
}

/// Whether the error is a unique key violation on the named index
pub(crate) fn is_duplicate_on(error: &sqlx::Error, key: &str) -> bool {
    match error {
        sqlx::Error::Database(db) => db.is_unique_violation() && db.message().contains(key),
        _ => false,
    }
}

/// Which contact field a duplicate-key message on `users` refers to
pub(crate) fn duplicate_contact_field(message: &str) -> Option<ContactField> {
    if message.contains("uq_users_email") {
        Some(ContactField::Email)
    } else if message.contains("uq_users_phone") {
        Some(ContactField::Phone)
    } else {
        None
    }
}
