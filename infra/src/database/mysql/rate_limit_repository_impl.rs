//! MySQL implementation of the RateLimitRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use wl_core::domain::entities::rate_limit::RateLimitRecord;
use wl_core::errors::DomainError;
use wl_core::repositories::RateLimitRepository;

use super::{db_error, parse_uuid};

/// MySQL implementation of RateLimitRepository
///
/// One row per user. Increments are a single upsert that also resets the
/// counter when the stored window is older than the current one.
pub struct MySqlRateLimitRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRateLimitRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RateLimitRecord, DomainError> {
        let map = db_error("Failed to read rate limit row");

        let user_id: String = row.try_get("user_id").map_err(&map)?;
        let used: u32 = row.try_get("requests_used_today").map_err(&map)?;

        Ok(RateLimitRecord {
            user_id: parse_uuid(&user_id, "user_id")?,
            window_start: row.try_get::<DateTime<Utc>, _>("window_start").map_err(&map)?,
            requests_used_today: used,
            blocked_until: row.try_get("blocked_until").map_err(&map)?,
        })
    }

    async fn fetch_in(
        tx: &mut Transaction<'_, MySql>,
        user_id: Uuid,
    ) -> Result<RateLimitRecord, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, window_start, requests_used_today, blocked_until
            FROM contact_change_rate_limits
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_one(&mut **tx)
        .await
        .map_err(db_error("Failed to read rate limit record"))?;

        Self::row_to_record(&row)
    }
}

#[async_trait]
impl RateLimitRepository for MySqlRateLimitRepository {
    async fn find(&self, user_id: Uuid) -> Result<Option<RateLimitRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, window_start, requests_used_today, blocked_until
            FROM contact_change_rate_limits
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find rate limit record"))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn increment(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Assignments are evaluated left to right: the counter is computed
        // against the stored window before the window moves forward.
        sqlx::query(
            r#"
            INSERT INTO contact_change_rate_limits (user_id, window_start, requests_used_today)
            VALUES (?, ?, 1)
            ON DUPLICATE KEY UPDATE
                requests_used_today = IF(window_start < VALUES(window_start), 1, requests_used_today + 1),
                window_start = GREATEST(window_start, VALUES(window_start))
            "#,
        )
        .bind(user_id.to_string())
        .bind(window_start)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to increment rate limit"))?;

        let record = Self::fetch_in(&mut tx, user_id).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit rate limit increment"))?;

        Ok(record)
    }

    async fn block_until(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO contact_change_rate_limits (user_id, window_start, requests_used_today, blocked_until)
            VALUES (?, ?, 0, ?)
            ON DUPLICATE KEY UPDATE blocked_until = VALUES(blocked_until)
            "#,
        )
        .bind(user_id.to_string())
        .bind(window_start)
        .bind(until)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to block user"))?;

        let record = Self::fetch_in(&mut tx, user_id).await?;
        tx.commit()
            .await
            .map_err(db_error("Failed to commit rate limit block"))?;

        Ok(record)
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM contact_change_rate_limits WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete rate limit record"))?;

        Ok(result.rows_affected() > 0)
    }
}
