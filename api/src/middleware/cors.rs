//! CORS middleware configuration for cross-origin requests.
//!
//! The member web app and the mobile apps call the API from other origins.
//! With no configured origins any origin is allowed, which suits local
//! development; deployments list their site origins in
//! `server.allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use wl_shared::config::ServerConfig;

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the server configuration
pub fn create_cors(config: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-user-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(MAX_AGE);

    if config.allowed_origins.is_empty() {
        tracing::info!("CORS allows any origin");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin = origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_configured_origin_is_allowed() {
        let mut config = ServerConfig::default();
        config.allowed_origins = vec!["https://www.wedlink.example".to_string()];

        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://www.wedlink.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://www.wedlink.example"
        );
    }
}
