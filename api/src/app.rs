//! Application state and factory
//!
//! This module holds the shared services handed to every handler and
//! provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use wl_core::repositories::{
    AuditLogRepository, ChangeRequestRepository, RateLimitRepository, UserRepository,
};
use wl_core::services::{ChangeRequestManager, ConfirmationHandler, RateLimitAdmin};
use wl_infra::health::{check_all, HealthCheck};
use wl_shared::config::ServerConfig;
use wl_shared::{error_codes, ErrorResponse, HealthResponse};

use crate::handlers::{json_error_handler, query_error_handler};
use crate::middleware::{create_cors, AdminCredentials};
use crate::routes::{admin, contact_change, verify};

/// Application state that holds shared services
pub struct AppState<C, U, R, A>
where
    C: ChangeRequestRepository,
    U: UserRepository,
    R: RateLimitRepository,
    A: AuditLogRepository,
{
    pub manager: Arc<ChangeRequestManager<C, U, R, A>>,
    pub confirmations: Arc<ConfirmationHandler<C, U, A>>,
    pub rate_limit_admin: Arc<RateLimitAdmin<R, A>>,
    /// Backing services reported by `/health`
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl<C, U, R, A> AppState<C, U, R, A>
where
    C: ChangeRequestRepository,
    U: UserRepository,
    R: RateLimitRepository,
    A: AuditLogRepository,
{
    pub fn new(
        manager: Arc<ChangeRequestManager<C, U, R, A>>,
        confirmations: Arc<ConfirmationHandler<C, U, A>>,
        rate_limit_admin: Arc<RateLimitAdmin<R, A>>,
    ) -> Self {
        Self {
            manager,
            confirmations,
            rate_limit_admin,
            health_checks: Vec::new(),
        }
    }

    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = checks;
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<C, U, R, A>(
    app_state: web::Data<AppState<C, U, R, A>>,
    admin_credentials: web::Data<AdminCredentials>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(admin_credentials)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Add middleware (the last one wraps outermost)
        .wrap(create_cors(server))
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check::<C, U, R, A>))
        // Confirmation link target
        .route(
            "/verify-email-change",
            web::get().to(verify::confirm_change::<C, U, R, A>),
        )
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::resource("/contact-change")
                        .route(web::post().to(contact_change::request_change::<C, U, R, A>))
                        .route(web::get().to(contact_change::pending_request::<C, U, R, A>))
                        .route(web::delete().to(contact_change::cancel_request::<C, U, R, A>)),
                )
                .service(
                    web::scope("/admin/rate-limits")
                        .route(
                            "/{user_id}/reset",
                            web::post().to(admin::reset_rate_limit::<C, U, R, A>),
                        )
                        .route(
                            "/{user_id}/block",
                            web::post().to(admin::block_rate_limit::<C, U, R, A>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Answers 503 when any backing service is unreachable.
async fn health_check<C, U, R, A>(state: web::Data<AppState<C, U, R, A>>) -> HttpResponse
where
    C: ChangeRequestRepository + 'static,
    U: UserRepository + 'static,
    R: RateLimitRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let services = check_all(&state.health_checks).await;
    let response = HealthResponse::new("wedlink-api", env!("CARGO_PKG_VERSION"), services);

    if response.is_healthy() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
