//! Daily rate limiting of contact change requests
//!
//! - `window` - Calendar-day windows in a fixed reference timezone
//! - `guard` - The check/record pair used by the request workflow
//! - `admin` - Audited reset and block operations for support staff

mod admin;
mod guard;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use admin::RateLimitAdmin;
pub use guard::RateLimitGuard;
pub use types::{RateLimitDecision, RateLimitUsage};
pub use window::DailyWindow;
