use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use thiserror::Error;

use wl_core::errors::{ContactChangeError, DomainError};
use wl_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Message shown for faults that must not leak internal detail
const TRY_AGAIN_LATER: &str = "Something went wrong on our side. Please try again later";

/// Handler error carrying a domain failure
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] DomainError);

impl ApiError {
    pub fn domain(&self) -> &DomainError {
        &self.0
    }

    /// Result code and body of the error
    fn body(&self) -> ErrorResponse {
        match &self.0 {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            DomainError::NotFound { resource } => ErrorResponse::new(
                error_codes::NOT_FOUND,
                format!("{} not found", resource),
            ),
            DomainError::Unauthorized => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required")
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, TRY_AGAIN_LATER)
            }
            DomainError::ContactChange(err) => contact_change_body(err),
        }
    }
}

fn contact_change_body(err: &ContactChangeError) -> ErrorResponse {
    let response = ErrorResponse::new(err.code(), err.to_string());
    match err {
        ContactChangeError::RateLimited {
            reason,
            wait_minutes,
        } => response
            .add_detail("reason", reason)
            .add_detail("wait_minutes", wait_minutes),
        ContactChangeError::RequestAlreadyPending { summary } => {
            response.add_detail("pending_request", summary)
        }
        ContactChangeError::ValueAlreadyTaken { field } => response.add_detail("field", field),
        ContactChangeError::DeliveryFailed { request_id } => {
            response.add_detail("request_id", request_id)
        }
        ContactChangeError::InvalidToken
        | ContactChangeError::ExpiredToken
        | ContactChangeError::AlreadyConfirmed => response,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DomainError::ContactChange(err) => match err {
                ContactChangeError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                ContactChangeError::RequestAlreadyPending { .. }
                | ContactChangeError::ValueAlreadyTaken { .. }
                | ContactChangeError::AlreadyConfirmed => StatusCode::CONFLICT,
                ContactChangeError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
                ContactChangeError::InvalidToken => StatusCode::BAD_REQUEST,
                ContactChangeError::ExpiredToken => StatusCode::GONE,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        let mut response = self.body().to_response(status);
        if let DomainError::ContactChange(ContactChangeError::RateLimited { wait_minutes, .. }) =
            &self.0
        {
            let seconds = (*wait_minutes).max(1) * 60;
            if let Ok(value) = header::HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

/// Turn malformed JSON bodies into `validationError` responses
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(DomainError::validation(format!("Invalid request body: {}", err))).into()
}

/// Turn malformed query strings into `validationError` responses
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(DomainError::validation(format!("Invalid query string: {}", err))).into()
}
