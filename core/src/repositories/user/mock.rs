//! In-memory implementation of UserRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserContact;
use crate::errors::DomainError;

use super::UserRepository;

/// In-memory user directory
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserContact>>>,
    fail_updates: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Add or replace a user
    pub async fn insert(&self, user: UserContact) {
        self.users.write().await.insert(user.id, user);
    }

    /// Make `apply_contact_change` return a storage error
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub async fn get(&self, user_id: Uuid) -> Option<UserContact> {
        self.users.read().await.get(&user_id).cloned()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserContact>, DomainError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn exists_with_email_or_phone(
        &self,
        value: &str,
        excluding_user_id: Uuid,
    ) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| {
            u.id != excluding_user_id
                && (u.email.as_deref() == Some(value) || u.phone.as_deref() == Some(value))
        }))
    }

    async fn apply_contact_change(
        &self,
        user_id: Uuid,
        new_email: Option<&str>,
        new_phone: Option<&str>,
    ) -> Result<UserContact, DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock repository error"));
        }

        let mut users = self.users.write().await;
        let user = users.get_mut(&user_id).ok_or_else(|| DomainError::NotFound {
            resource: format!("user {}", user_id),
        })?;
        if let Some(email) = new_email {
            user.email = Some(email.to_string());
        }
        if let Some(phone) = new_phone {
            user.phone = Some(phone.to_string());
        }
        Ok(user.clone())
    }
}
