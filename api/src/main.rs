use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use tracing::{info, warn};

use wl_api::{create_app, middleware::AdminCredentials, telemetry, AppState};
use wl_core::repositories::RateLimitRepository;
use wl_core::services::{
    AuditService, AuditServiceConfig, ChangeRequestCleanup, ChangeRequestManager, Clock,
    ConfirmationHandler, NotificationDispatcher, RateLimitAdmin, RateLimitGuard, SystemClock,
};
use wl_infra::cache::{RedisClient, RedisRateLimitRepository};
use wl_infra::database::{
    DatabasePool, MySqlAuditLogRepository, MySqlChangeRequestRepository,
    MySqlRateLimitRepository, MySqlUserRepository,
};
use wl_infra::health::HealthCheck;
use wl_infra::notification::create_providers;
use wl_shared::config::RateLimitStore;
use wl_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (reads .env first)
    let config = AppConfig::load()?;

    telemetry::init_tracing(&config.logging)?;
    info!(environment = %config.environment, "Starting WedLink API server");

    let pool = DatabasePool::new(&config.database).await?;
    pool.run_migrations().await?;

    let mut health_checks: Vec<Arc<dyn HealthCheck>> = vec![Arc::new(pool.clone())];

    match config.rate_limit.store {
        RateLimitStore::Database => {
            let rate_limits = Arc::new(MySqlRateLimitRepository::new(pool.get_pool().clone()));
            serve(config, pool, rate_limits, health_checks).await
        }
        RateLimitStore::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            health_checks.push(Arc::new(client.clone()));
            let rate_limits = Arc::new(RedisRateLimitRepository::new(client));
            serve(config, pool, rate_limits, health_checks).await
        }
    }
}

/// Wire the services onto the chosen rate limit store and run the server
async fn serve<R>(
    config: AppConfig,
    pool: DatabasePool,
    rate_limits: Arc<R>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
) -> anyhow::Result<()>
where
    R: RateLimitRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let requests = Arc::new(MySqlChangeRequestRepository::new(pool.get_pool().clone()));
    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let audit = Arc::new(AuditService::new(
        Arc::new(MySqlAuditLogRepository::new(pool.get_pool().clone())),
        AuditServiceConfig::default(),
    ));

    let guard = Arc::new(RateLimitGuard::new(
        rate_limits.clone(),
        clock.clone(),
        &config.rate_limit,
    )?);

    let providers = create_providers(&config.notification);
    if providers.is_empty() {
        warn!("No notification providers configured; every contact change will fail delivery");
    }
    let dispatcher = Arc::new(NotificationDispatcher::from_config(
        providers,
        &config.notification,
        clock.clone(),
    ));
    info!(
        providers = ?dispatcher.provider_names(),
        max_latency_ms = dispatcher.max_latency().as_millis() as u64,
        "Notification dispatcher ready"
    );

    let manager = Arc::new(ChangeRequestManager::new(
        requests.clone(),
        users.clone(),
        guard.clone(),
        dispatcher,
        audit.clone(),
        clock.clone(),
        config.contact_change.clone(),
    ));
    let confirmations = Arc::new(ConfirmationHandler::new(
        requests.clone(),
        users,
        audit.clone(),
        clock.clone(),
    ));
    let rate_limit_admin = Arc::new(RateLimitAdmin::new(
        rate_limits,
        audit,
        clock.clone(),
        guard.window(),
    ));

    let cleanup = Arc::new(ChangeRequestCleanup::new(
        requests,
        clock,
        config.contact_change.cleanup_interval_seconds,
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(
        AppState::new(manager, confirmations, rate_limit_admin).with_health_checks(health_checks),
    );
    let admin_credentials = web::Data::new(AdminCredentials::new(config.admin_api_key.clone()));
    if !admin_credentials.is_enabled() {
        warn!("admin_api_key is not set; administrative endpoints reject every request");
    }

    let server_config = config.server.clone();
    let bind_address = server_config.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), admin_credentials.clone(), &server_config)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server stopped, shutting down background tasks");
    cleanup_task.abort();
    pool.close().await;
    Ok(())
}
