//! In-memory implementation of RateLimitRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::rate_limit::RateLimitRecord;
use crate::errors::DomainError;

use super::RateLimitRepository;

/// In-memory rate limit store
pub struct MockRateLimitRepository {
    records: Arc<RwLock<HashMap<Uuid, RateLimitRecord>>>,
}

impl MockRateLimitRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a record directly
    pub async fn insert(&self, record: RateLimitRecord) {
        self.records.write().await.insert(record.user_id, record);
    }
}

impl Default for MockRateLimitRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitRepository for MockRateLimitRepository {
    async fn find(&self, user_id: Uuid) -> Result<Option<RateLimitRecord>, DomainError> {
        Ok(self.records.read().await.get(&user_id).cloned())
    }

    async fn increment(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id)
            .or_insert_with(|| RateLimitRecord::new(user_id, window_start));
        record.increment(window_start);
        Ok(record.clone())
    }

    async fn block_until(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id)
            .or_insert_with(|| RateLimitRecord::new(user_id, window_start));
        record.blocked_until = Some(until);
        Ok(record.clone())
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(&user_id).is_some())
    }
}
