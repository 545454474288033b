//! Unit tests for the rate limit record

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::rate_limit::RateLimitRecord;

#[test]
fn test_increment_within_window() {
    let window = Utc.with_ymd_and_hms(2026, 3, 13, 18, 30, 0).unwrap();
    let mut record = RateLimitRecord::new(Uuid::new_v4(), window);
    record.increment(window);
    record.increment(window);
    assert_eq!(record.requests_used_today, 2);
    assert_eq!(record.used_in(window), 2);
}

#[test]
fn test_increment_rolls_window_over() {
    let day_one = Utc.with_ymd_and_hms(2026, 3, 13, 18, 30, 0).unwrap();
    let day_two = day_one + Duration::days(1);
    let mut record = RateLimitRecord::new(Uuid::new_v4(), day_one);
    record.requests_used_today = 3;

    assert_eq!(record.used_in(day_two), 0);

    record.increment(day_two);
    assert_eq!(record.window_start, day_two);
    assert_eq!(record.requests_used_today, 1);
}

#[test]
fn test_block_expires() {
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let mut record = RateLimitRecord::new(Uuid::new_v4(), now);
    assert!(!record.is_blocked(now));

    record.blocked_until = Some(now + Duration::hours(1));
    assert!(record.is_blocked(now));
    assert!(!record.is_blocked(now + Duration::hours(1)));
}
