//! Notification dispatch configuration

use serde::{Deserialize, Serialize};

/// Kind of delivery channel a provider entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// JSON-over-HTTPS transactional email API
    Http,
    /// Writes the message to the log instead of delivering it
    Log,
}

/// One configured provider; list order is priority order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Name used in logs and receipts
    pub name: String,

    /// Provider kind
    pub kind: ProviderKind,

    /// API endpoint for HTTP providers
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key for HTTP providers
    #[serde(default)]
    pub api_key: Option<String>,

    /// Disabled entries are skipped when building the provider list
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ProviderConfig {
    /// A log-only provider entry
    pub fn log(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ProviderKind::Log,
            endpoint: None,
            api_key: None,
            enabled: true,
        }
    }

    /// An HTTP provider entry
    pub fn http(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ProviderKind::Http,
            endpoint: Some(endpoint.into()),
            api_key: Some(api_key.into()),
            enabled: true,
        }
    }
}

/// Notification dispatcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Upper bound for a single provider attempt, in milliseconds
    #[serde(default = "default_attempt_timeout")]
    pub per_attempt_timeout_ms: u64,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Providers in priority order
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            per_attempt_timeout_ms: default_attempt_timeout(),
            from_address: "no-reply@wedlink.example".to_string(),
            from_name: default_from_name(),
            providers: Vec::new(),
        }
    }
}

impl NotificationConfig {
    /// Development configuration: a single log-only provider
    pub fn development() -> Self {
        Self {
            providers: vec![ProviderConfig::log("console")],
            ..Default::default()
        }
    }

    /// Formatted `From` header value
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_attempt_timeout() -> u64 {
    10_000
}

fn default_from_name() -> String {
    "WedLink".to_string()
}
