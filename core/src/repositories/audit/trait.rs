//! Audit log repository trait defining the interface for audit log persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

/// Repository trait for AuditLog entity persistence operations
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Create a new audit log entry
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError>;

    /// Find audit logs by user ID, newest first
    async fn find_by_user(&self, user_id: Uuid, limit: usize)
        -> Result<Vec<AuditLog>, DomainError>;
}
