//! Request and response bodies of the HTTP surface

pub mod admin;
pub mod contact_change;
pub mod error;

pub use admin::{BlockRequest, RateLimitResetResponse, RateLimitStateResponse};
pub use contact_change::{
    AppliedChangeResponse, CancelRequest, ConfirmationSentResponse, ContactChangeRequest,
    VerifyQuery,
};
pub use error::{ErrorResponse, ErrorResponseExt};
