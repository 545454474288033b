//! Contact change verification workflow
//!
//! This module provides the request → confirm workflow for changing a
//! member's email address or phone number:
//! - `ChangeRequestManager` validates, rate limits, deduplicates and sends the link
//! - `ConfirmationHandler` consumes a token and applies the change
//! - `ChangeRequestCleanup` sweeps expired requests in the background

mod cleanup;
mod confirmation;
mod manager;
mod types;


pub use cleanup::ChangeRequestCleanup;
pub use confirmation::ConfirmationHandler;
pub use manager::ChangeRequestManager;
pub use types::{AppliedChange, ConfirmationSent, RequestOutcome};
