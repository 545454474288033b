//! Request extractors for caller identity and language.
//!
//! Authentication happens upstream: the gateway verifies the session and
//! forwards the member id in `X-User-Id`. Administrative endpoints are
//! guarded by a shared key in `X-Admin-Key`.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use constant_time_eq::constant_time_eq;
use uuid::Uuid;

use wl_core::errors::DomainError;
use wl_shared::Language;

use crate::handlers::ApiError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";
pub const ADMIN_ACTOR_HEADER: &str = "X-Admin-Actor";

/// Member on whose behalf the request is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub Uuid);

impl FromRequest for CallerId {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .map(CallerId)
            .ok_or(ApiError::from(DomainError::Unauthorized));

        ready(result)
    }
}

/// Template language picked from `Accept-Language`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestLanguage(pub Language);

impl FromRequest for RequestLanguage {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let language = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Language::from_accept_language)
            .unwrap_or_default();

        ready(Ok(RequestLanguage(language)))
    }
}

/// Shared key for the administrative endpoints, registered as app data
#[derive(Clone, Default)]
pub struct AdminCredentials {
    api_key: Option<String>,
}

impl AdminCredentials {
    /// An empty key disables the administrative endpoints
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn verify(&self, presented: &str) -> bool {
        match &self.api_key {
            Some(expected) => constant_time_eq(expected.as_bytes(), presented.as_bytes()),
            None => false,
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// An authenticated administrator, named for the audit log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminActor(pub String);

impl FromRequest for AdminActor {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let authorized = match req.app_data::<web::Data<AdminCredentials>>() {
            Some(credentials) => req
                .headers()
                .get(ADMIN_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(|key| credentials.verify(key))
                .unwrap_or(false),
            None => false,
        };

        if !authorized {
            tracing::warn!(path = req.path(), "Rejected administrative request");
            return ready(Err(ApiError::from(DomainError::Unauthorized)));
        }

        let actor = req
            .headers()
            .get(ADMIN_ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("admin")
            .to_string();

        ready(Ok(AdminActor(actor)))
    }
}
