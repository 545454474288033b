use actix_web::{web, HttpResponse};
use uuid::Uuid;

use wl_core::repositories::{
    AuditLogRepository, ChangeRequestRepository, RateLimitRepository, UserRepository,
};
use wl_shared::{error_codes, ApiResponse};

use crate::app::AppState;
use crate::dto::{BlockRequest, RateLimitResetResponse, RateLimitStateResponse};
use crate::handlers::ApiError;
use crate::middleware::AdminActor;

/// Handler for POST /api/v1/admin/rate-limits/{user_id}/reset
///
/// Clears the user's daily count and any block.
pub async fn reset_rate_limit<C, U, R, A>(
    state: web::Data<AppState<C, U, R, A>>,
    actor: AdminActor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let user_id = path.into_inner();
    let existed = state.rate_limit_admin.reset(user_id, &actor.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        error_codes::RATE_LIMIT_RESET,
        RateLimitResetResponse { user_id, existed },
    )))
}

/// Handler for POST /api/v1/admin/rate-limits/{user_id}/block
///
/// Denies every contact change request from the user until `until`.
pub async fn block_rate_limit<C, U, R, A>(
    state: web::Data<AppState<C, U, R, A>>,
    actor: AdminActor,
    path: web::Path<Uuid>,
    body: web::Json<BlockRequest>,
) -> Result<HttpResponse, ApiError>
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let record = state
        .rate_limit_admin
        .block(path.into_inner(), body.until, &actor.0)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        error_codes::RATE_LIMIT_BLOCKED,
        RateLimitStateResponse::from(record),
    )))
}
