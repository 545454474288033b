//! In-memory implementation of ChangeRequestRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::change_request::ChangeRequest;
use crate::errors::{ContactChangeError, DomainError};

use super::ChangeRequestRepository;

/// In-memory change request store
///
/// The uniqueness check and the insert happen under one write lock, which
/// gives the same guarantee as the unique index of the SQL schema.
pub struct MockChangeRequestRepository {
    requests: Arc<RwLock<HashMap<Uuid, ChangeRequest>>>,
    fail_mark_verified: AtomicBool,
}

impl MockChangeRequestRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            fail_mark_verified: AtomicBool::new(false),
        }
    }

    /// Make `mark_verified` return a storage error
    pub fn set_fail_mark_verified(&self, fail: bool) {
        self.fail_mark_verified.store(fail, Ordering::SeqCst);
    }

    /// All stored requests for a user
    pub async fn requests_for(&self, user_id: Uuid) -> Vec<ChangeRequest> {
        self.requests
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<ChangeRequest> {
        self.requests.read().await.get(&id).cloned()
    }

    /// Insert a request without the active-request check
    pub async fn insert_raw(&self, request: ChangeRequest) {
        self.requests.write().await.insert(request.id, request);
    }
}

impl Default for MockChangeRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeRequestRepository for MockChangeRequestRepository {
    async fn create(&self, request: &ChangeRequest) -> Result<(), DomainError> {
        let mut requests = self.requests.write().await;
        let now = request.created_at;

        requests.retain(|_, r| !(r.user_id == request.user_id && !r.verified && r.is_expired(now)));

        if let Some(existing) = requests
            .values()
            .find(|r| r.user_id == request.user_id && r.is_active(now))
        {
            return Err(ContactChangeError::RequestAlreadyPending {
                summary: existing.summary(),
            }
            .into());
        }

        if requests.values().any(|r| r.token_hash == request.token_hash) {
            return Err(DomainError::internal("Duplicate token hash"));
        }

        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<ChangeRequest>, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests
            .values()
            .find(|r| r.user_id == user_id && r.is_active(now))
            .cloned())
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<ChangeRequest>, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests
            .values()
            .find(|r| r.token_hash == token_hash)
            .cloned())
    }

    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        if self.fail_mark_verified.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock repository error"));
        }

        let mut requests = self.requests.write().await;
        match requests.get_mut(&id) {
            Some(request) if !request.verified && !request.is_expired(now) => {
                request.verified = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revert_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut requests = self.requests.write().await;
        let user_id = match requests.get(&id) {
            Some(request) if request.verified => request.user_id,
            _ => return Ok(false),
        };

        // Same rule as the unique index: the slot may have been taken meanwhile
        if requests
            .values()
            .any(|r| r.id != id && r.user_id == user_id && !r.verified)
        {
            return Err(DomainError::internal("Another request holds the active slot"));
        }

        if let Some(request) = requests.get_mut(&id) {
            request.verified = false;
        }
        Ok(true)
    }

    async fn delete_pending(&self, user_id: Uuid, token_hash: &str) -> Result<bool, DomainError> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|_, r| !(r.user_id == user_id && r.token_hash == token_hash && !r.verified));
        Ok(requests.len() < before)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|_, r| !r.is_expired(now));
        Ok(before - requests.len())
    }
}
