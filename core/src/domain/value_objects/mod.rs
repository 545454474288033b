//! Value objects representing immutable domain concepts.

pub mod contact;
pub mod notification;
pub mod token;


// Re-export commonly used types
pub use contact::{ContactChangeInput, ContactField, ContactUpdate};
pub use notification::{DeliveryReceipt, NotificationJob, NotificationKind};
pub use token::{hash_token, VerificationToken};
