//! Administrative rate limit endpoints

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::{json, Value};

use common::{TestApp, ADMIN_KEY};
use wl_core::domain::entities::audit::AuditEventType;
use wl_core::services::Clock;

#[actix_web::test]
async fn admin_endpoints_require_the_key() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);
    let uri = format!("/api/v1/admin/rate-limits/{}/reset", t.user_id);

    let req = test::TestRequest::post().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("X-Admin-Key", "guess"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    assert!(t.audit.get_all_logs().await.is_empty());
}

#[actix_web::test]
async fn block_then_reset_restores_access() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);
    let until = t.clock.now() + Duration::hours(2);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/rate-limits/{}/block", t.user_id))
        .insert_header(("X-Admin-Key", ADMIN_KEY))
        .insert_header(("X-Admin-Actor", "support:meera"))
        .set_json(json!({ "until": until }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "rateLimitBlocked");
    assert_eq!(body["data"]["requests_used_today"], 0);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header(("X-User-Id", t.user_id.to_string()))
        .set_json(json!({ "new_email": "new@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["reason"], "temporarilyBlocked");
    assert_eq!(body["details"]["wait_minutes"], 120);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/rate-limits/{}/reset", t.user_id))
        .insert_header(("X-Admin-Key", ADMIN_KEY))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "rateLimitReset");
    assert_eq!(body["data"]["existed"], true);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header(("X-User-Id", t.user_id.to_string()))
        .set_json(json!({ "new_email": "new@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::ACCEPTED);

    let events = t.audit.event_types().await;
    assert!(events.contains(&AuditEventType::RateLimitBlocked));
    assert!(events.contains(&AuditEventType::RateLimitReset));
}

#[actix_web::test]
async fn block_in_the_past_is_rejected() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/rate-limits/{}/block", t.user_id))
        .insert_header(("X-Admin-Key", ADMIN_KEY))
        .set_json(json!({ "until": t.clock.now() - Duration::minutes(1) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
