//! Application wired to in-memory collaborators

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use wl_api::{middleware::AdminCredentials, AppState};
use wl_core::domain::entities::user::UserContact;
use wl_core::domain::value_objects::notification::NotificationJob;
use wl_core::errors::ProviderError;
use wl_core::repositories::{
    MockAuditLogRepository, MockChangeRequestRepository, MockRateLimitRepository,
    MockUserRepository,
};
use wl_core::services::{
    AuditService, AuditServiceConfig, ChangeRequestManager, Clock, ConfirmationHandler,
    ManualClock, NotificationDispatcher, NotificationProvider, RateLimitAdmin, RateLimitGuard,
};
use wl_infra::health::HealthCheck;
use wl_infra::InfrastructureError;
use wl_shared::{ContactChangeConfig, RateLimitConfig};

pub const ADMIN_KEY: &str = "test-admin-key";

pub type TestState = AppState<
    MockChangeRequestRepository,
    MockUserRepository,
    MockRateLimitRepository,
    MockAuditLogRepository,
>;

/// Provider that keeps every delivered message
#[derive(Default)]
pub struct Inbox {
    sent: Mutex<Vec<NotificationJob>>,
}

impl Inbox {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_recipient(&self) -> String {
        self.sent.lock().unwrap().last().unwrap().recipient.clone()
    }

    /// Token from the link in the latest message
    pub fn last_token(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let body = &sent.last().expect("a message was delivered").text_body;
        let start = body.find("token=").expect("body contains a link") + "token=".len();
        body[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    }
}

#[async_trait]
impl NotificationProvider for Inbox {
    fn name(&self) -> &str {
        "inbox"
    }

    async fn send(&self, job: &NotificationJob) -> Result<Option<String>, ProviderError> {
        self.sent.lock().unwrap().push(job.clone());
        Ok(Some(Uuid::new_v4().to_string()))
    }
}

/// Backing service whose reachability the test controls
pub struct SwitchableService {
    pub up: AtomicBool,
}

#[async_trait]
impl HealthCheck for SwitchableService {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<bool, InfrastructureError> {
        if self.up.load(Ordering::SeqCst) {
            Ok(true)
        } else {
            Err(InfrastructureError::Config("connection refused".to_string()))
        }
    }
}

pub struct TestApp {
    pub state: web::Data<TestState>,
    pub admin: web::Data<AdminCredentials>,
    pub users: Arc<MockUserRepository>,
    pub audit: Arc<MockAuditLogRepository>,
    pub inbox: Arc<Inbox>,
    pub clock: Arc<ManualClock>,
    pub database: Arc<SwitchableService>,
    pub user_id: Uuid,
}

/// Saturday 2026-03-14 14:30 IST
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
}

impl TestApp {
    pub async fn new(daily_limit: u32) -> Self {
        let clock = Arc::new(ManualClock::new(start_time()));
        let dyn_clock: Arc<dyn Clock> = clock.clone();

        let users = Arc::new(MockUserRepository::new());
        let user_id = Uuid::new_v4();
        users
            .insert(
                UserContact::new(
                    user_id,
                    Some("priya@example.com".to_string()),
                    Some("+919876543210".to_string()),
                )
                .with_display_name("Priya"),
            )
            .await;

        let requests = Arc::new(MockChangeRequestRepository::new());
        let rate_limits = Arc::new(MockRateLimitRepository::new());
        let audit_repo = Arc::new(MockAuditLogRepository::new());
        let audit = Arc::new(AuditService::new(
            audit_repo.clone(),
            AuditServiceConfig {
                async_writes: false,
            },
        ));

        let guard = Arc::new(
            RateLimitGuard::new(
                rate_limits.clone(),
                dyn_clock.clone(),
                &RateLimitConfig::default().with_daily_limit(daily_limit),
            )
            .unwrap(),
        );

        let inbox = Arc::new(Inbox::default());
        let dispatcher = Arc::new(NotificationDispatcher::new(
            vec![inbox.clone() as Arc<dyn NotificationProvider>],
            std::time::Duration::from_millis(500),
            dyn_clock.clone(),
        ));

        let manager = Arc::new(ChangeRequestManager::new(
            requests.clone(),
            users.clone(),
            guard.clone(),
            dispatcher,
            audit.clone(),
            dyn_clock.clone(),
            ContactChangeConfig::new("https://www.wedlink.example"),
        ));
        let confirmations = Arc::new(ConfirmationHandler::new(
            requests,
            users.clone(),
            audit.clone(),
            dyn_clock.clone(),
        ));
        let admin = Arc::new(RateLimitAdmin::new(
            rate_limits,
            audit,
            dyn_clock,
            guard.window(),
        ));

        let database = Arc::new(SwitchableService {
            up: AtomicBool::new(true),
        });

        Self {
            state: web::Data::new(
                AppState::new(manager, confirmations, admin)
                    .with_health_checks(vec![database.clone() as Arc<dyn HealthCheck>]),
            ),
            admin: web::Data::new(AdminCredentials::new(Some(ADMIN_KEY.to_string()))),
            users,
            audit: audit_repo,
            inbox,
            clock,
            database,
            user_id,
        }
    }
}

/// Build the service for a `TestApp`
macro_rules! init_app {
    ($test_app:expr) => {
        actix_web::test::init_service(wl_api::create_app(
            $test_app.state.clone(),
            $test_app.admin.clone(),
            &wl_shared::ServerConfig::default(),
        ))
        .await
    };
}
