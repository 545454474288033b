//! MySQL implementation of the UserRepository trait.
//!
//! Only the contact columns of the `users` table are read or written here.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use wl_core::domain::entities::user::UserContact;
use wl_core::errors::{ContactChangeError, DomainError};
use wl_core::repositories::UserRepository;

use super::{db_error, duplicate_contact_field, parse_uuid};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to UserContact entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<UserContact, DomainError> {
        let map = db_error("Failed to read user row");
        let id: String = row.try_get("id").map_err(&map)?;

        Ok(UserContact {
            id: parse_uuid(&id, "id")?,
            email: row.try_get("email").map_err(&map)?,
            phone: row.try_get("phone").map_err(&map)?,
            display_name: row.try_get("display_name").map_err(&map)?,
        })
    }

    /// Turn a unique key violation on the contact columns into `valueAlreadyTaken`
    fn map_update_error(error: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db) = &error {
            if db.is_unique_violation() {
                if let Some(field) = duplicate_contact_field(db.message()) {
                    return ContactChangeError::ValueAlreadyTaken { field }.into();
                }
            }
        }
        db_error("Failed to update user contact details")(error)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserContact>, DomainError> {
        let row = sqlx::query("SELECT id, email, phone, display_name FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists_with_email_or_phone(
        &self,
        value: &str,
        excluding_user_id: Uuid,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS matches
            FROM users
            WHERE (email = ? OR phone = ?) AND id <> ?
            "#,
        )
        .bind(value)
        .bind(value)
        .bind(excluding_user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check contact value"))?;

        let matches: i64 = row
            .try_get("matches")
            .map_err(db_error("Failed to read contact value check"))?;
        Ok(matches > 0)
    }

    async fn apply_contact_change(
        &self,
        user_id: Uuid,
        new_email: Option<&str>,
        new_phone: Option<&str>,
    ) -> Result<UserContact, DomainError> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE(?, email),
                phone = COALESCE(?, phone)
            WHERE id = ?
            "#,
        )
        .bind(new_email)
        .bind(new_phone)
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(Self::map_update_error)?;

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("user {}", user_id),
            })
    }
}
