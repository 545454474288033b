//! Redis client implementation
//!
//! A multiplexed async connection with retry logic and the handful of
//! operations the rate limit store needs.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult, Script};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

/// Redis client with retry logic
///
/// Cloning is cheap; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of retry attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use wl_infra::config::CacheConfig;
    /// use wl_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            max_retries,
            retry_delay_ms,
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let attempt =
                tokio::time::timeout(connect_timeout, client.get_multiplexed_async_connection())
                    .await
                    .unwrap_or_else(|_| {
                        Err(RedisError::from((
                            redis::ErrorKind::IoError,
                            "Connection timed out",
                        )))
                    });

            match attempt {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Apply the configured key prefix
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// All fields of a hash; empty when the key does not exist
    pub async fn hash_get_all(
        &self,
        key: &str,
    ) -> Result<HashMap<String, String>, InfrastructureError> {
        debug!("Reading hash '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.hgetall::<_, HashMap<String, String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to read hash '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Run a Lua script against a single key
    ///
    /// Scripts execute atomically on the server, which is what makes
    /// read-modify-write sequences safe across concurrent callers. They are
    /// not idempotent: a lost reply may hide a script that already ran, so
    /// only errors raised before execution are retried.
    pub async fn run_script(
        &self,
        script: &Script,
        key: &str,
        args: &[i64],
    ) -> Result<Vec<i64>, InfrastructureError> {
        self.execute_with_retry_when(is_rejected_before_execution, |mut conn| {
            let script = script.clone();
            let key = key.to_string();
            let args = args.to_vec();
            Box::pin(async move {
                let mut invocation = script.key(key);
                for arg in args {
                    invocation.arg(arg);
                }
                invocation.invoke_async::<_, Vec<i64>>(&mut conn).await
            })
        })
        .await
        .map_err(|e| {
            error!("Failed to run script on '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        let deleted_count = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        Ok(deleted_count > 0)
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Execute a Redis operation with automatic retry logic
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        self.execute_with_retry_when(is_retriable_error, operation).await
    }

    /// Execute a Redis operation, retrying only errors `retry_on` accepts
    async fn execute_with_retry_when<F, T>(
        &self,
        retry_on: fn(&RedisError) -> bool,
        operation: F,
    ) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        retry_with_backoff(self.max_retries, self.retry_delay_ms, retry_on, || {
            operation(self.connection.clone())
        })
        .await
    }
}

/// Run `operation` until it succeeds, `retry_on` rejects the error or the
/// attempts run out, doubling the delay between attempts up to 5 seconds
pub(crate) async fn retry_with_backoff<T, Fut, F>(
    max_retries: u32,
    retry_delay_ms: u64,
    retry_on: fn(&RedisError) -> bool,
    mut operation: F,
) -> RedisResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = RedisResult<T>>,
{
    let mut attempts = 0;
    let mut delay = retry_delay_ms;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempts < max_retries && retry_on(&e) => {
                warn!(
                    "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                    attempts, max_retries, e, delay
                );
                sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(5000);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Errors the server raises without having run the command
pub(crate) fn is_rejected_before_execution(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain
    )
}

/// Check if a Redis error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError | redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://****{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
