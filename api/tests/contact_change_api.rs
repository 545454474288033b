//! Contact change endpoints against in-memory collaborators

#[macro_use]
mod common;

use actix_web::{http::header, http::StatusCode, test};
use chrono::Duration;
use std::sync::atomic::Ordering;
use serde_json::{json, Value};

use common::TestApp;

const USER_HEADER: &str = "X-User-Id";

#[actix_web::test]
async fn request_then_confirm_applies_new_email() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_email": "Priya.Sharma@Example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "confirmationSent");
    assert_eq!(body["data"]["fields"], json!(["email"]));
    assert_eq!(body["data"]["used"], 1);
    assert_eq!(body["data"]["limit"], 3);
    assert_eq!(t.inbox.last_recipient(), "priya.sharma@example.com");

    // Pending banner
    let req = test::TestRequest::get()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .to_request();
    let pending: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pending["data"]["request_id"], body["data"]["request_id"]);

    let token = t.inbox.last_token();
    let req = test::TestRequest::get()
        .uri(&format!("/verify-email-change?token={}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let applied: Value = test::read_body_json(resp).await;
    assert_eq!(applied["status"], "applied");
    assert_eq!(applied["data"]["email"], "priya.sharma@example.com");

    let user = t.users.get(t.user_id).await.unwrap();
    assert_eq!(user.email.as_deref(), Some("priya.sharma@example.com"));

    // Second click on the same link
    let req = test::TestRequest::get()
        .uri(&format!("/verify-email-change?token={}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "alreadyConfirmed");
}

#[actix_web::test]
async fn missing_caller_is_unauthorized() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .set_json(json!({ "new_email": "new@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(t.inbox.count(), 0);
}

#[actix_web::test]
async fn unchanged_details_report_no_changes() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_email": "PRIYA@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "noChangesDetected");
    assert_eq!(t.inbox.count(), 0);
}

#[actix_web::test]
async fn second_request_is_already_pending() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_email": "a@b.com" }))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_phone": "+15555550123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "requestAlreadyPending");
    assert_eq!(
        body["details"]["pending_request"]["request_id"],
        first["data"]["request_id"]
    );
    assert_eq!(t.inbox.count(), 1);
}

#[actix_web::test]
async fn cancelled_requests_still_count_towards_quota() {
    let t = TestApp::new(1).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_email": "first@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::ACCEPTED);

    let req = test::TestRequest::delete()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "token": t.inbox.last_token() }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_email": "second@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    // 14:30 IST to midnight IST
    assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "34200");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "rateLimited");
    assert_eq!(body["details"]["wait_minutes"], 570);
    assert_eq!(t.inbox.count(), 1);
}

#[actix_web::test]
async fn bad_tokens_are_rejected() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    for uri in [
        "/verify-email-change",
        "/verify-email-change?token=",
        "/verify-email-change?token=not%20a%20token",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalidToken");
    }
}

#[actix_web::test]
async fn expired_link_is_gone() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_phone": "+91 98123 40000" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::ACCEPTED);
    // Phone changes are confirmed through the current email
    assert_eq!(t.inbox.last_recipient(), "priya@example.com");

    t.clock.advance(Duration::hours(5));

    let req = test::TestRequest::get()
        .uri(&format!("/verify-email-change?token={}", t.inbox.last_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "expiredToken");

    let user = t.users.get(t.user_id).await.unwrap();
    assert_eq!(user.phone.as_deref(), Some("+919876543210"));
}

#[actix_web::test]
async fn malformed_input_is_a_validation_error() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"new_email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validationError");

    let req = test::TestRequest::post()
        .uri("/api/v1/contact-change")
        .insert_header((USER_HEADER, t.user_id.to_string()))
        .set_json(json!({ "new_email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn health_and_unknown_routes() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn health_reports_unreachable_database() {
    let t = TestApp::new(3).await;
    let app = init_app!(t);
    t.database.up.store(false, Ordering::SeqCst);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["database"]["message"], "unreachable");
}
