//! MySQL implementation of the AuditLogRepository trait.
//!
//! Audit rows are append-only; nothing in this crate updates or deletes them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use wl_core::domain::entities::audit::{AuditEventType, AuditLog};
use wl_core::errors::DomainError;
use wl_core::repositories::AuditLogRepository;

use super::{db_error, parse_uuid};

/// MySQL implementation of AuditLogRepository
pub struct MySqlAuditLogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    /// Create a new MySQL audit log repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to AuditLog entity
    fn row_to_audit_log(row: &sqlx::mysql::MySqlRow) -> Result<AuditLog, DomainError> {
        let map = db_error("Failed to read audit log row");

        let id: String = row.try_get("id").map_err(&map)?;
        let user_id: String = row.try_get("user_id").map_err(&map)?;
        let request_id: Option<String> = row.try_get("request_id").map_err(&map)?;

        let event_type_str: String = row.try_get("event_type").map_err(&map)?;
        let event_type = event_type_str
            .parse::<AuditEventType>()
            .map_err(|message| DomainError::Internal { message })?;

        Ok(AuditLog {
            id: parse_uuid(&id, "id")?,
            event_type,
            user_id: parse_uuid(&user_id, "user_id")?,
            actor: row.try_get("actor").map_err(&map)?,
            request_id: request_id
                .map(|id| parse_uuid(&id, "request_id"))
                .transpose()?,
            event_data: row.try_get::<Option<JsonValue>, _>("event_data").map_err(&map)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(&map)?,
        })
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contact_change_audit_log (
                id, event_type, user_id, actor, request_id, event_data, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(audit_log.id.to_string())
        .bind(audit_log.event_type.as_str())
        .bind(audit_log.user_id.to_string())
        .bind(&audit_log.actor)
        .bind(audit_log.request_id.map(|id| id.to_string()))
        .bind(&audit_log.event_data)
        .bind(audit_log.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create audit log"))?;

        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_type, user_id, actor, request_id, event_data, created_at
            FROM contact_change_audit_log
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to find audit logs by user"))?;

        rows.iter().map(Self::row_to_audit_log).collect()
    }
}
