//! Redis implementation of the RateLimitRepository trait.
//!
//! Each user has one hash `rate_limit:{user_id}` with the fields
//! `window_start`, `used` and `blocked_until` (Unix seconds). The key
//! expires once both the window and any block have ended.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use redis::Script;
use std::collections::HashMap;
use uuid::Uuid;

use wl_core::domain::entities::rate_limit::RateLimitRecord;
use wl_core::errors::DomainError;
use wl_core::repositories::RateLimitRepository;

use super::redis_client::RedisClient;

/// Length of a rate limit window in seconds
const WINDOW_SECONDS: i64 = 24 * 60 * 60;

/// Count one request, resetting the counter when the window moved on.
/// ARGV: window_start, window_seconds. Returns {window_start, used, blocked_until}.
static INCREMENT_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        local window_start = tonumber(ARGV[1])
        local stored = tonumber(redis.call('HGET', KEYS[1], 'window_start') or '0')
        local used
        if stored < window_start then
            redis.call('HSET', KEYS[1], 'window_start', window_start, 'used', 1)
            stored = window_start
            used = 1
        else
            used = redis.call('HINCRBY', KEYS[1], 'used', 1)
        end
        local blocked = tonumber(redis.call('HGET', KEYS[1], 'blocked_until') or '0')
        redis.call('EXPIREAT', KEYS[1], math.max(stored + tonumber(ARGV[2]), blocked))
        return {stored, used, blocked}
        "#,
    )
});

/// Set `blocked_until`, creating the record if needed.
/// ARGV: window_start, window_seconds, blocked_until. Same return shape.
static BLOCK_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            redis.call('HSET', KEYS[1], 'window_start', ARGV[1], 'used', 0)
        end
        redis.call('HSET', KEYS[1], 'blocked_until', ARGV[3])
        local stored = tonumber(redis.call('HGET', KEYS[1], 'window_start'))
        local used = tonumber(redis.call('HGET', KEYS[1], 'used'))
        local blocked = tonumber(ARGV[3])
        redis.call('EXPIREAT', KEYS[1], math.max(stored + tonumber(ARGV[2]), blocked))
        return {stored, used, blocked}
        "#,
    )
});

/// Rate limit records kept in Redis
pub struct RedisRateLimitRepository {
    client: RedisClient,
}

impl RedisRateLimitRepository {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, user_id: Uuid) -> String {
        self.client.key(&format!("rate_limit:{}", user_id))
    }
}

#[async_trait]
impl RateLimitRepository for RedisRateLimitRepository {
    async fn find(&self, user_id: Uuid) -> Result<Option<RateLimitRecord>, DomainError> {
        let fields = self.client.hash_get_all(&self.key(user_id)).await?;
        record_from_hash(user_id, &fields)
    }

    async fn increment(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError> {
        let values = self
            .client
            .run_script(
                &INCREMENT_SCRIPT,
                &self.key(user_id),
                &[window_start.timestamp(), WINDOW_SECONDS],
            )
            .await?;
        record_from_script(user_id, &values)
    }

    async fn block_until(
        &self,
        user_id: Uuid,
        window_start: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<RateLimitRecord, DomainError> {
        // Round up so the block never ends early
        let until_seconds = until.timestamp() + i64::from(until.timestamp_subsec_nanos() > 0);
        let values = self
            .client
            .run_script(
                &BLOCK_SCRIPT,
                &self.key(user_id),
                &[window_start.timestamp(), WINDOW_SECONDS, until_seconds],
            )
            .await?;
        record_from_script(user_id, &values)
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.client.delete(&self.key(user_id)).await?)
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, DomainError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| DomainError::internal(format!("Invalid timestamp {}", seconds)))
}

fn blocked_until(seconds: i64) -> Result<Option<DateTime<Utc>>, DomainError> {
    if seconds > 0 {
        timestamp(seconds).map(Some)
    } else {
        Ok(None)
    }
}

/// Build a record from the `{window_start, used, blocked_until}` script reply
pub(crate) fn record_from_script(
    user_id: Uuid,
    values: &[i64],
) -> Result<RateLimitRecord, DomainError> {
    let [window_start, used, blocked] = values else {
        return Err(DomainError::internal(format!(
            "Unexpected rate limit script reply: {:?}",
            values
        )));
    };

    Ok(RateLimitRecord {
        user_id,
        window_start: timestamp(*window_start)?,
        requests_used_today: u32::try_from(*used).unwrap_or(0),
        blocked_until: blocked_until(*blocked)?,
    })
}

/// Build a record from the stored hash; `None` when the key is absent
pub(crate) fn record_from_hash(
    user_id: Uuid,
    fields: &HashMap<String, String>,
) -> Result<Option<RateLimitRecord>, DomainError> {
    if fields.is_empty() {
        return Ok(None);
    }

    let number = |name: &str| -> Result<i64, DomainError> {
        fields
            .get(name)
            .map(|v| v.parse::<i64>())
            .transpose()
            .map(|v| v.unwrap_or(0))
            .map_err(|e| DomainError::internal(format!("Invalid rate limit field {}: {}", name, e)))
    };

    record_from_script(
        user_id,
        &[number("window_start")?, number("used")?, number("blocked_until")?],
    )
    .map(Some)
}
