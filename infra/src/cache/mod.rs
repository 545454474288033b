//! Cache module for Redis-backed state
//!
//! Redis is the alternative store for per-user rate limit records, selected
//! with `rate_limit.store = "redis"`.

pub mod rate_limit_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use rate_limit_store::RedisRateLimitRepository;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use wl_shared::config::CacheConfig;
