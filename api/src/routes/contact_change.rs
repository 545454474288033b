use actix_web::{web, HttpResponse};
use validator::Validate;

use wl_core::errors::DomainError;
use wl_core::repositories::{
    AuditLogRepository, ChangeRequestRepository, RateLimitRepository, UserRepository,
};
use wl_core::services::RequestOutcome;
use wl_shared::{error_codes, ApiResponse};

use crate::app::AppState;
use crate::dto::{CancelRequest, ConfirmationSentResponse, ContactChangeRequest};
use crate::handlers::ApiError;
use crate::middleware::{CallerId, RequestLanguage};

/// Handler for POST /api/v1/contact-change
///
/// Sends a confirmation link for a new email and/or phone number.
///
/// # Response
/// * `202 Accepted` - `confirmationSent`, with quota usage
/// * `200 OK` - `noChangesDetected`
/// * `429` `rateLimited` with `Retry-After`, `409` `requestAlreadyPending` or
///   `valueAlreadyTaken`, `502` `deliveryFailed`, `400` `validationError`
pub async fn request_change<C, U, R, A>(
    state: web::Data<AppState<C, U, R, A>>,
    caller: CallerId,
    language: RequestLanguage,
    body: web::Json<ContactChangeRequest>,
) -> Result<HttpResponse, ApiError>
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    body.validate()
        .map_err(|e| DomainError::validation(e.to_string()))?;

    let outcome = state
        .manager
        .request_change(caller.0, &body.to_input(), language.0)
        .await?;

    let code = outcome.code();
    let response = match outcome {
        RequestOutcome::ConfirmationSent(sent) => HttpResponse::Accepted()
            .json(ApiResponse::new(code, ConfirmationSentResponse::from(sent))),
        RequestOutcome::NoChangesDetected => {
            HttpResponse::Ok().json(ApiResponse::<()>::status_only(code))
        }
    };
    Ok(response)
}

/// Handler for GET /api/v1/contact-change
///
/// Returns the caller's request awaiting confirmation, or 404.
pub async fn pending_request<C, U, R, A>(
    state: web::Data<AppState<C, U, R, A>>,
    caller: CallerId,
) -> Result<HttpResponse, ApiError>
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    match state.manager.pending_request(caller.0).await? {
        Some(summary) => Ok(HttpResponse::Ok().json(ApiResponse::new(
            error_codes::REQUEST_ALREADY_PENDING,
            summary,
        ))),
        None => Err(DomainError::NotFound {
            resource: "Pending contact change request".to_string(),
        }
        .into()),
    }
}

/// Handler for DELETE /api/v1/contact-change
///
/// Withdraws the caller's pending request. Always 204, whether or not a
/// matching request existed.
pub async fn cancel_request<C, U, R, A>(
    state: web::Data<AppState<C, U, R, A>>,
    caller: CallerId,
    body: web::Json<CancelRequest>,
) -> Result<HttpResponse, ApiError>
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    body.validate()
        .map_err(|e| DomainError::validation(e.to_string()))?;

    state
        .manager
        .cancel_pending_request(caller.0, body.token.trim())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
