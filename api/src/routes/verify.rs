use actix_web::{web, HttpResponse};

use wl_core::errors::{ContactChangeError, DomainError};
use wl_core::repositories::{
    AuditLogRepository, ChangeRequestRepository, RateLimitRepository, UserRepository,
};
use wl_shared::{error_codes, ApiResponse};

use crate::app::AppState;
use crate::dto::{AppliedChangeResponse, VerifyQuery};
use crate::handlers::ApiError;

/// Handler for GET /verify-email-change?token=
///
/// Target of the emailed link. Applies the change on the first valid click.
///
/// # Response
/// * `200 OK` - `applied`, with the applied fields
/// * `400` `invalidToken`, `410` `expiredToken`, `409` `alreadyConfirmed` or
///   `valueAlreadyTaken`
pub async fn confirm_change<C, U, R, A>(
    state: web::Data<AppState<C, U, R, A>>,
    query: web::Query<VerifyQuery>,
) -> Result<HttpResponse, ApiError>
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let Some(token) = query.token.as_deref() else {
        return Err(DomainError::from(ContactChangeError::InvalidToken).into());
    };

    let applied = state.confirmations.confirm(token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        error_codes::APPLIED,
        AppliedChangeResponse::from(applied),
    )))
}
