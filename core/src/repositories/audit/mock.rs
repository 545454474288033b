//! Mock implementation of AuditLogRepository for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::DomainError;

use super::AuditLogRepository;

/// Mock implementation of AuditLogRepository for testing
pub struct MockAuditLogRepository {
    logs: Arc<Mutex<Vec<AuditLog>>>,
    should_fail: AtomicBool,
}

impl MockAuditLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Get all stored logs for testing
    pub async fn get_all_logs(&self) -> Vec<AuditLog> {
        self.logs.lock().await.clone()
    }

    /// Event types in the order they were written
    pub async fn event_types(&self) -> Vec<AuditEventType> {
        self.logs.lock().await.iter().map(|l| l.event_type).collect()
    }
}

impl Default for MockAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock repository error"));
        }
        self.logs.lock().await.push(audit_log.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock repository error"));
        }
        let logs = self.logs.lock().await;
        let mut result: Vec<AuditLog> = logs
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit);
        Ok(result)
    }
}
