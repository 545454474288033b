//! Tests for the rate limit guard

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use wl_shared::RateLimitConfig;

use crate::domain::entities::rate_limit::RateLimitRecord;
use crate::errors::DenialReason;
use crate::repositories::{MockRateLimitRepository, RateLimitRepository};
use crate::services::clock::ManualClock;
use crate::services::rate_limit::{RateLimitDecision, RateLimitGuard};

fn start() -> DateTime<Utc> {
    // 14:30 IST
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
}

fn guard(
    repo: Arc<MockRateLimitRepository>,
    clock: Arc<ManualClock>,
    limit: u32,
) -> RateLimitGuard<MockRateLimitRepository> {
    RateLimitGuard::new(repo, clock, &RateLimitConfig::default().with_daily_limit(limit)).unwrap()
}

#[tokio::test]
async fn test_new_user_is_allowed() {
    let guard = guard(
        Arc::new(MockRateLimitRepository::new()),
        Arc::new(ManualClock::new(start())),
        3,
    );
    assert_eq!(
        guard.check(Uuid::new_v4()).await.unwrap(),
        RateLimitDecision::Allowed { remaining: 3 }
    );
}

#[tokio::test]
async fn test_denied_after_limit_with_wait_until_midnight() {
    let repo = Arc::new(MockRateLimitRepository::new());
    let clock = Arc::new(ManualClock::new(start()));
    let guard = guard(repo, clock, 3);
    let user_id = Uuid::new_v4();

    for _ in 0..3 {
        assert!(guard.check(user_id).await.unwrap().is_allowed());
        guard.record(user_id).await.unwrap();
    }

    // 14:30 IST -> 9h30m until midnight
    assert_eq!(
        guard.check(user_id).await.unwrap(),
        RateLimitDecision::Denied {
            reason: DenialReason::DailyLimitReached,
            wait_minutes: 570,
        }
    );
}

#[tokio::test]
async fn test_check_has_no_side_effects() {
    let repo = Arc::new(MockRateLimitRepository::new());
    let guard = guard(repo.clone(), Arc::new(ManualClock::new(start())), 3);
    let user_id = Uuid::new_v4();

    for _ in 0..5 {
        guard.check(user_id).await.unwrap();
    }
    assert!(repo.find(user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_full_window_rolls_over_without_reset() {
    let repo = Arc::new(MockRateLimitRepository::new());
    let clock = Arc::new(ManualClock::new(start()));
    let guard = guard(repo.clone(), clock.clone(), 3);
    let user_id = Uuid::new_v4();

    let window = guard.window().window_start(start());
    let mut record = RateLimitRecord::new(user_id, window);
    record.requests_used_today = 3;
    repo.insert(record).await;
    assert!(!guard.check(user_id).await.unwrap().is_allowed());

    clock.advance(Duration::days(1));
    assert_eq!(
        guard.check(user_id).await.unwrap(),
        RateLimitDecision::Allowed { remaining: 3 }
    );

    let record = guard.record(user_id).await.unwrap();
    assert_eq!(record.requests_used_today, 1);
    assert_eq!(guard.usage_of(&record).used, 1);
}

#[tokio::test]
async fn test_block_denies_regardless_of_count() {
    let repo = Arc::new(MockRateLimitRepository::new());
    let clock = Arc::new(ManualClock::new(start()));
    let guard = guard(repo.clone(), clock.clone(), 3);
    let user_id = Uuid::new_v4();

    let mut record = RateLimitRecord::new(user_id, guard.window().window_start(start()));
    record.blocked_until = Some(start() + Duration::minutes(90));
    repo.insert(record).await;

    assert_eq!(
        guard.check(user_id).await.unwrap(),
        RateLimitDecision::Denied {
            reason: DenialReason::TemporarilyBlocked,
            wait_minutes: 90,
        }
    );

    clock.advance(Duration::minutes(90));
    assert!(guard.check(user_id).await.unwrap().is_allowed());
}

#[tokio::test]
async fn test_disabled_guard_always_allows() {
    let repo = Arc::new(MockRateLimitRepository::new());
    let mut config = RateLimitConfig::default().with_daily_limit(1);
    config.enabled = false;
    let guard =
        RateLimitGuard::new(repo, Arc::new(ManualClock::new(start())), &config).unwrap();
    let user_id = Uuid::new_v4();

    guard.record(user_id).await.unwrap();
    guard.record(user_id).await.unwrap();
    assert!(guard.check(user_id).await.unwrap().is_allowed());
}

#[tokio::test]
async fn test_usage_reports_remaining_and_reset_time() {
    let repo = Arc::new(MockRateLimitRepository::new());
    let guard = guard(repo, Arc::new(ManualClock::new(start())), 3);
    let user_id = Uuid::new_v4();

    guard.record(user_id).await.unwrap();
    let usage = guard.usage(user_id).await.unwrap();
    assert_eq!(usage.used, 1);
    assert_eq!(usage.limit, 3);
    assert_eq!(usage.remaining(), 2);
    assert_eq!(
        usage.resets_at,
        Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap()
    );
}
