//! Redis rate limit store integration tests
//!
//! Run with `REDIS_URL=redis://localhost:6379 cargo test -- --ignored`

use chrono::{Duration, DurationRound, Utc};
use uuid::Uuid;

use wl_core::repositories::RateLimitRepository;
use wl_infra::cache::{RedisClient, RedisRateLimitRepository};
use wl_shared::CacheConfig;

async fn repository() -> RedisRateLimitRepository {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let client = RedisClient::new(CacheConfig::new(url).with_key_prefix("wl_test"))
        .await
        .unwrap();
    RedisRateLimitRepository::new(client)
}

#[tokio::test]
#[ignore] // Requires running Redis
async fn increment_and_rollover() {
    let repo = repository().await;
    let user_id = Uuid::new_v4();
    let today = Utc::now().duration_trunc(Duration::days(1)).unwrap();

    assert!(repo.find(user_id).await.unwrap().is_none());
    assert_eq!(repo.increment(user_id, today).await.unwrap().requests_used_today, 1);
    assert_eq!(repo.increment(user_id, today).await.unwrap().requests_used_today, 2);

    let stored = repo.find(user_id).await.unwrap().unwrap();
    assert_eq!(stored.window_start, today);
    assert_eq!(stored.requests_used_today, 2);

    let rolled = repo.increment(user_id, today + Duration::days(1)).await.unwrap();
    assert_eq!(rolled.requests_used_today, 1);

    assert!(repo.delete(user_id).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires running Redis
async fn block_keeps_count() {
    let repo = repository().await;
    let user_id = Uuid::new_v4();
    let today = Utc::now().duration_trunc(Duration::days(1)).unwrap();
    let until = (Utc::now() + Duration::hours(2)).duration_trunc(Duration::seconds(1)).unwrap();

    repo.increment(user_id, today).await.unwrap();
    let blocked = repo.block_until(user_id, today, until).await.unwrap();

    assert_eq!(blocked.requests_used_today, 1);
    assert_eq!(blocked.blocked_until, Some(until));

    repo.delete(user_id).await.unwrap();
}
