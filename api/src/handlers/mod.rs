//! Mapping of domain failures onto HTTP responses

pub mod error;

pub use error::{json_error_handler, query_error_handler, ApiError};
