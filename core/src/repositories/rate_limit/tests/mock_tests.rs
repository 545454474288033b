//! Tests for the in-memory rate limit repository

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::repositories::{MockRateLimitRepository, RateLimitRepository};

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let repo = Arc::new(MockRateLimitRepository::new());
    let user_id = Uuid::new_v4();
    let window = Utc.with_ymd_and_hms(2026, 3, 13, 18, 30, 0).unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment(user_id, window).await.unwrap() })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let record = repo.find(user_id).await.unwrap().unwrap();
    assert_eq!(record.requests_used_today, 10);
}

#[tokio::test]
async fn test_block_survives_rollover() {
    let repo = MockRateLimitRepository::new();
    let user_id = Uuid::new_v4();
    let window = Utc.with_ymd_and_hms(2026, 3, 13, 18, 30, 0).unwrap();
    let until = window + Duration::days(3);

    repo.block_until(user_id, window, until).await.unwrap();
    let record = repo.increment(user_id, window + Duration::days(1)).await.unwrap();

    assert_eq!(record.requests_used_today, 1);
    assert_eq!(record.blocked_until, Some(until));
}

#[tokio::test]
async fn test_delete() {
    let repo = MockRateLimitRepository::new();
    let user_id = Uuid::new_v4();
    let window = Utc.with_ymd_and_hms(2026, 3, 13, 18, 30, 0).unwrap();
    repo.increment(user_id, window).await.unwrap();

    assert!(repo.delete(user_id).await.unwrap());
    assert!(!repo.delete(user_id).await.unwrap());
    assert!(repo.find(user_id).await.unwrap().is_none());
}
