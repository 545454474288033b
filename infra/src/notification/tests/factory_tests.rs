use wl_shared::{NotificationConfig, ProviderConfig};

use crate::notification::create_providers;

#[test]
fn test_providers_keep_configured_order() {
    let config = NotificationConfig {
        providers: vec![
            ProviderConfig::http("primary", "https://mail-one.example/v1/send", "key-1"),
            ProviderConfig::http("secondary", "https://mail-two.example/send", "key-2"),
            ProviderConfig::log("console"),
        ],
        ..Default::default()
    };

    let providers = create_providers(&config);
    let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["primary", "secondary", "console"]);
}

#[test]
fn test_disabled_and_misconfigured_entries_are_skipped() {
    let mut disabled = ProviderConfig::log("disabled");
    disabled.enabled = false;
    let mut missing_key = ProviderConfig::http("no-key", "https://mail.example/send", "k");
    missing_key.api_key = None;
    let bad_url = ProviderConfig::http("bad-url", "not a url", "k");

    let config = NotificationConfig {
        providers: vec![disabled, missing_key, bad_url, ProviderConfig::log("console")],
        ..Default::default()
    };

    let providers = create_providers(&config);
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].name(), "console");
}

#[test]
fn test_no_providers() {
    assert!(create_providers(&NotificationConfig::default()).is_empty());
}
