//! Unit tests for decoding stored rate limit records

use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::cache::rate_limit_store::{record_from_hash, record_from_script};

#[test]
fn test_record_from_script_reply() {
    let user_id = Uuid::new_v4();
    let window_start = Utc.with_ymd_and_hms(2026, 3, 13, 18, 30, 0).unwrap();

    let record = record_from_script(user_id, &[window_start.timestamp(), 2, 0]).unwrap();

    assert_eq!(record.user_id, user_id);
    assert_eq!(record.window_start, window_start);
    assert_eq!(record.requests_used_today, 2);
    assert_eq!(record.blocked_until, None);
}

#[test]
fn test_record_from_script_with_block() {
    let until = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
    let record = record_from_script(Uuid::new_v4(), &[1_773_426_600, 0, until.timestamp()]).unwrap();
    assert_eq!(record.blocked_until, Some(until));
}

#[test]
fn test_malformed_script_reply() {
    assert!(record_from_script(Uuid::new_v4(), &[1, 2]).is_err());
}

#[test]
fn test_record_from_hash() {
    let user_id = Uuid::new_v4();
    assert!(record_from_hash(user_id, &HashMap::new()).unwrap().is_none());

    let fields: HashMap<String, String> = [
        ("window_start".to_string(), "1773426600".to_string()),
        ("used".to_string(), "3".to_string()),
    ]
    .into_iter()
    .collect();
    let record = record_from_hash(user_id, &fields).unwrap().unwrap();
    assert_eq!(record.requests_used_today, 3);
    assert_eq!(record.blocked_until, None);

    let corrupt: HashMap<String, String> =
        [("used".to_string(), "many".to_string())].into_iter().collect();
    assert!(record_from_hash(user_id, &corrupt).is_err());
}
