//! Tests for the notification dispatcher

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::value_objects::notification::{NotificationJob, NotificationKind};
use crate::errors::{DeliveryError, ProviderError};
use crate::services::clock::{ManualClock, SystemClock};
use crate::services::notification::{NotificationDispatcher, NotificationProvider};

use super::mocks::{Behaviour, ScriptedProvider};

fn job() -> NotificationJob {
    NotificationJob {
        recipient: "priya@example.com".to_string(),
        subject: "Confirm".to_string(),
        html_body: "<p>Confirm</p>".to_string(),
        text_body: "Confirm".to_string(),
        kind: NotificationKind::EmailChangeConfirmation,
    }
}

fn dispatcher(providers: &[Arc<ScriptedProvider>]) -> NotificationDispatcher {
    let providers: Vec<Arc<dyn NotificationProvider>> = providers
        .iter()
        .map(|p| p.clone() as Arc<dyn NotificationProvider>)
        .collect();
    NotificationDispatcher::new(providers, Duration::from_millis(200), Arc::new(SystemClock))
}

#[tokio::test]
async fn test_first_success_wins_and_later_providers_are_skipped() {
    let first = Arc::new(ScriptedProvider::new("first", Behaviour::Succeed(Some("m-1"))));
    let second = Arc::new(ScriptedProvider::new("second", Behaviour::Succeed(Some("m-2"))));

    let receipt = dispatcher(&[first.clone(), second.clone()])
        .send(job())
        .await
        .unwrap();

    assert_eq!(receipt.provider, "first");
    assert_eq!(receipt.provider_message_id.as_deref(), Some("m-1"));
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn test_falls_back_to_next_provider() {
    let failing = Arc::new(ScriptedProvider::new(
        "p1",
        Behaviour::Fail(ProviderError::Rejected {
            status: 503,
            message: "unavailable".to_string(),
        }),
    ));
    let working = Arc::new(ScriptedProvider::new("p2", Behaviour::Succeed(None)));

    let receipt = dispatcher(&[failing.clone(), working.clone()])
        .send(job())
        .await
        .unwrap();

    assert_eq!(receipt.provider, "p2");
    assert!(receipt.provider_message_id.is_none());
    assert_eq!(failing.calls(), 1);
    assert_eq!(working.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_counts_as_failure() {
    let slow = Arc::new(ScriptedProvider::new(
        "slow",
        Behaviour::Hang(Duration::from_secs(60)),
    ));
    let working = Arc::new(ScriptedProvider::new("backup", Behaviour::Succeed(Some("b-1"))));

    let receipt = dispatcher(&[slow, working]).send(job()).await.unwrap();
    assert_eq!(receipt.provider, "backup");
}

#[tokio::test(start_paused = true)]
async fn test_all_providers_timing_out_lists_every_failure() {
    let providers: Vec<Arc<ScriptedProvider>> = ["a", "b", "c"]
        .into_iter()
        .map(|name| Arc::new(ScriptedProvider::new(name, Behaviour::Hang(Duration::from_secs(60)))))
        .collect();

    let started = tokio::time::Instant::now();
    let error = dispatcher(&providers).send(job()).await.unwrap_err();

    match &error {
        DeliveryError::AllProvidersFailed { failures } => {
            assert_eq!(failures.len(), 3);
            let names: Vec<&str> = failures.iter().map(|f| f.provider.as_str()).collect();
            assert_eq!(names, vec!["a", "b", "c"]);
            assert!(failures
                .iter()
                .all(|f| f.error == ProviderError::Timeout { timeout_ms: 200 }));
        }
        other => panic!("Expected AllProvidersFailed, got {:?}", other),
    }
    // Sequential attempts: total time is the sum of the per-attempt timeouts
    assert_eq!(started.elapsed(), Duration::from_millis(600));
}

#[tokio::test]
async fn test_receipt_is_stamped_by_the_clock() {
    let sent_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
    let provider = Arc::new(ScriptedProvider::new("first", Behaviour::Succeed(None)));
    let dispatcher = NotificationDispatcher::new(
        vec![provider as Arc<dyn NotificationProvider>],
        Duration::from_millis(200),
        Arc::new(ManualClock::new(sent_at)),
    );

    let receipt = dispatcher.send(job()).await.unwrap();
    assert_eq!(receipt.delivered_at, sent_at);
}

#[tokio::test]
async fn test_no_providers() {
    let dispatcher =
        NotificationDispatcher::new(Vec::new(), Duration::from_millis(100), Arc::new(SystemClock));
    let error = dispatcher
        .send(job())
        .await
        .unwrap_err();
    assert!(matches!(error, DeliveryError::NoProviders));
}

#[test]
fn test_max_latency_is_sum_of_timeouts() {
    let providers: Vec<Arc<ScriptedProvider>> = (0..3)
        .map(|_| Arc::new(ScriptedProvider::new("p", Behaviour::Succeed(None))))
        .collect();
    assert_eq!(dispatcher(&providers).max_latency(), Duration::from_millis(600));
    assert_eq!(dispatcher(&providers).provider_names(), vec!["p", "p", "p"]);
}
