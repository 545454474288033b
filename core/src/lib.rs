//! # WedLink Core
//!
//! Core business logic and domain layer for the WedLink contact change
//! workflow. This crate contains domain entities, business services,
//! repository interfaces, and error types; persistence and delivery
//! adapters live in `wl_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
