//! Typed outcomes of the contact change workflow and of notification delivery

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use wl_shared::error_codes;

use crate::domain::entities::change_request::PendingRequestSummary;
use crate::domain::value_objects::contact::ContactField;

/// Why the rate limiter refused a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DenialReason {
    /// The daily request quota for the current window is used up
    DailyLimitReached,
    /// An administrator blocked the user until a point in time
    TemporarilyBlocked,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::DailyLimitReached => "dailyLimitReached",
            DenialReason::TemporarilyBlocked => "temporarilyBlocked",
        }
    }
}

/// Caller-facing failures of the contact change workflow
#[derive(Error, Debug, Clone)]
pub enum ContactChangeError {
    #[error("Too many contact change requests. Try again in {wait_minutes} minutes")]
    RateLimited {
        reason: DenialReason,
        wait_minutes: i64,
    },

    #[error("A contact change request is already awaiting confirmation")]
    RequestAlreadyPending { summary: PendingRequestSummary },

    #[error("This {field} is already registered to another account")]
    ValueAlreadyTaken { field: ContactField },

    #[error("The confirmation message could not be delivered. Please try again later")]
    DeliveryFailed { request_id: Uuid },

    #[error("The confirmation link is invalid")]
    InvalidToken,

    #[error("The confirmation link has expired")]
    ExpiredToken,

    #[error("This change has already been confirmed")]
    AlreadyConfirmed,
}

impl ContactChangeError {
    /// Stable machine-readable result code
    pub fn code(&self) -> &'static str {
        match self {
            ContactChangeError::RateLimited { .. } => error_codes::RATE_LIMITED,
            ContactChangeError::RequestAlreadyPending { .. } => {
                error_codes::REQUEST_ALREADY_PENDING
            }
            ContactChangeError::ValueAlreadyTaken { .. } => error_codes::VALUE_ALREADY_TAKEN,
            ContactChangeError::DeliveryFailed { .. } => error_codes::DELIVERY_FAILED,
            ContactChangeError::InvalidToken => error_codes::INVALID_TOKEN,
            ContactChangeError::ExpiredToken => error_codes::EXPIRED_TOKEN,
            ContactChangeError::AlreadyConfirmed => error_codes::ALREADY_CONFIRMED,
        }
    }
}

/// Failure of a single provider attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider misconfigured: {0}")]
    Configuration(String),
}

/// One provider's failure, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: String,
    pub error: ProviderError,
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Aggregate failure of a dispatch
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    #[error("No notification providers are configured")]
    NoProviders,

    #[error("All {} notification providers failed", .failures.len())]
    AllProvidersFailed { failures: Vec<ProviderFailure> },
}

impl DeliveryError {
    /// Individual provider failures, in attempt order
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            DeliveryError::NoProviders => &[],
            DeliveryError::AllProvidersFailed { failures } => failures,
        }
    }
}
