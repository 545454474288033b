//! Shared error response structure and result codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable result code
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (wait time, field, pending request)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Caller-facing result codes of the contact change workflow
pub mod error_codes {
    pub const CONFIRMATION_SENT: &str = "confirmationSent";
    pub const NO_CHANGES_DETECTED: &str = "noChangesDetected";
    pub const RATE_LIMITED: &str = "rateLimited";
    pub const REQUEST_ALREADY_PENDING: &str = "requestAlreadyPending";
    pub const VALUE_ALREADY_TAKEN: &str = "valueAlreadyTaken";
    pub const DELIVERY_FAILED: &str = "deliveryFailed";
    pub const INVALID_TOKEN: &str = "invalidToken";
    pub const EXPIRED_TOKEN: &str = "expiredToken";
    pub const ALREADY_CONFIRMED: &str = "alreadyConfirmed";
    pub const APPLIED: &str = "applied";

    pub const RATE_LIMIT_RESET: &str = "rateLimitReset";
    pub const RATE_LIMIT_BLOCKED: &str = "rateLimitBlocked";

    pub const VALIDATION_ERROR: &str = "validationError";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const NOT_FOUND: &str = "notFound";
    pub const INTERNAL_ERROR: &str = "internalError";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

/// Result type with ErrorResponse as error
pub type ApiResult<T> = Result<T, ErrorResponse>;
