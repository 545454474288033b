//! Common utility functions

pub mod email;
pub mod phone;
pub mod validation;

// Re-export commonly used utilities
pub use email::{is_valid_email, mask_email, normalize_email};
pub use phone::{is_valid_phone, mask_phone_number, normalize_phone_number};
pub use validation::escape_html;
