//! Generic JSON-over-HTTPS transactional email provider.
//!
//! Sends `{from, to, subject, html, text}` with bearer authentication, the
//! request shape most transactional email APIs accept.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use wl_core::domain::value_objects::notification::NotificationJob;
use wl_core::errors::ProviderError;
use wl_core::services::NotificationProvider;
use wl_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Longest provider error body kept in a `ProviderError`
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// HTTP email provider
pub struct HttpEmailProvider {
    name: String,
    endpoint: String,
    api_key: String,
    sender: String,
    client: reqwest::Client,
}

impl HttpEmailProvider {
    /// Create a provider posting to `endpoint`
    ///
    /// The request itself is not given a timeout; the dispatcher bounds
    /// each attempt.
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        sender: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| InfrastructureError::Config(format!("Invalid endpoint {}: {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            name: name.into(),
            endpoint,
            api_key: api_key.into(),
            sender: sender.into(),
            client,
        })
    }
}

#[async_trait]
impl NotificationProvider for HttpEmailProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, job: &NotificationJob) -> Result<Option<String>, ProviderError> {
        let payload = EmailPayload {
            from: &self.sender,
            to: &job.recipient,
            subject: &job.subject,
            html: &job.html_body,
            text: &job.text_body,
        };

        debug!(
            provider = %self.name,
            recipient = %mask_email(&job.recipient),
            "Posting email to provider"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(provider = %self.name, status = status.as_u16(), "Email provider rejected message");
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message: truncate(&body, MAX_ERROR_BODY),
            });
        }

        // An accepted message with an unreadable body is still accepted
        let body: Option<Value> = response.json().await.ok();
        Ok(body.as_ref().and_then(message_id))
    }
}

/// Message id from the common response field names
pub(crate) fn message_id(body: &Value) -> Option<String> {
    ["id", "messageId", "MessageID", "message_id"]
        .iter()
        .find_map(|field| match body.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    }
}
