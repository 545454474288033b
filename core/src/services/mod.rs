//! Business services containing domain logic and use cases.

pub mod audit;
pub mod clock;
pub mod contact_change;
pub mod notification;
pub mod rate_limit;

// Re-export commonly used types
pub use audit::{AuditService, AuditServiceConfig};
pub use clock::{Clock, ManualClock, SystemClock};
pub use contact_change::{
    AppliedChange, ChangeRequestCleanup, ChangeRequestManager, ConfirmationHandler,
    ConfirmationSent, RequestOutcome,
};
pub use notification::{NotificationDispatcher, NotificationProvider, RenderedMessage, TemplateData};
pub use rate_limit::{DailyWindow, RateLimitAdmin, RateLimitDecision, RateLimitGuard, RateLimitUsage};
