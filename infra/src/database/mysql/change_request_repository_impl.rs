//! MySQL implementation of the ChangeRequestRepository trait.
//!
//! At most one unverified row per user is enforced by the unique index on
//! the generated `active_user_id` column, so two concurrent requests cannot
//! both be inserted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use wl_core::domain::entities::change_request::ChangeRequest;
use wl_core::errors::{ContactChangeError, DomainError};
use wl_core::repositories::ChangeRequestRepository;

use super::{db_error, is_duplicate_on, parse_uuid};

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, current_email, current_phone, new_email, new_phone,
           token_hash, created_at, expires_at, verified
    FROM contact_change_requests
"#;

/// MySQL implementation of ChangeRequestRepository
pub struct MySqlChangeRequestRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlChangeRequestRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &sqlx::mysql::MySqlRow) -> Result<ChangeRequest, DomainError> {
        let map = db_error("Failed to read change request row");

        let id: String = row.try_get("id").map_err(&map)?;
        let user_id: String = row.try_get("user_id").map_err(&map)?;

        Ok(ChangeRequest {
            id: parse_uuid(&id, "id")?,
            user_id: parse_uuid(&user_id, "user_id")?,
            current_email: row.try_get("current_email").map_err(&map)?,
            current_phone: row.try_get("current_phone").map_err(&map)?,
            new_email: row.try_get("new_email").map_err(&map)?,
            new_phone: row.try_get("new_phone").map_err(&map)?,
            token_hash: row.try_get("token_hash").map_err(&map)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(&map)?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(&map)?,
            verified: row.try_get("verified").map_err(&map)?,
        })
    }

    /// The user's unverified row, expired or not
    async fn find_unverified(&self, user_id: Uuid) -> Result<Option<ChangeRequest>, DomainError> {
        let query = format!("{} WHERE user_id = ? AND verified = FALSE", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find unverified change request"))?;

        row.as_ref().map(Self::row_to_request).transpose()
    }
}

#[async_trait]
impl ChangeRequestRepository for MySqlChangeRequestRepository {
    async fn create(&self, request: &ChangeRequest) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Expired unverified rows would otherwise still hold the active slot
        sqlx::query(
            r#"
            DELETE FROM contact_change_requests
            WHERE user_id = ? AND verified = FALSE AND expires_at <= ?
            "#,
        )
        .bind(request.user_id.to_string())
        .bind(request.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to purge expired change requests"))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO contact_change_requests (
                id, user_id, current_email, current_phone, new_email, new_phone,
                token_hash, created_at, expires_at, verified
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.id.to_string())
        .bind(request.user_id.to_string())
        .bind(&request.current_email)
        .bind(&request.current_phone)
        .bind(&request.new_email)
        .bind(&request.new_phone)
        .bind(&request.token_hash)
        .bind(request.created_at)
        .bind(request.expires_at)
        .bind(request.verified)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {
                tx.commit()
                    .await
                    .map_err(db_error("Failed to commit change request"))?;
                Ok(())
            }
            Err(e) if is_duplicate_on(&e, "uq_ccr_active_user") => {
                drop(tx);
                let existing = self.find_unverified(request.user_id).await?.ok_or_else(|| {
                    DomainError::internal("Active change request vanished after conflict")
                })?;
                Err(ContactChangeError::RequestAlreadyPending {
                    summary: existing.summary(),
                }
                .into())
            }
            Err(e) => Err(db_error("Failed to create change request")(e)),
        }
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<ChangeRequest>, DomainError> {
        let query = format!(
            "{} WHERE user_id = ? AND verified = FALSE AND expires_at > ?",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find active change request"))?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<ChangeRequest>, DomainError> {
        let query = format!("{} WHERE token_hash = ?", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find change request by token"))?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE contact_change_requests
            SET verified = TRUE
            WHERE id = ? AND verified = FALSE AND expires_at > ?
            "#,
        )
        .bind(id.to_string())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to mark change request verified"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revert_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        // Fails on uq_ccr_active_user when a newer request took the slot
        let result = sqlx::query(
            "UPDATE contact_change_requests SET verified = FALSE WHERE id = ? AND verified = TRUE",
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revert change request verification"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_pending(&self, user_id: Uuid, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM contact_change_requests
            WHERE user_id = ? AND token_hash = ? AND verified = FALSE
            "#,
        )
        .bind(user_id.to_string())
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to delete change request"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM contact_change_requests WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete expired change requests"))?;

        Ok(result.rows_affected() as usize)
    }
}
