//! Notification delivery for confirmation links
//!
//! Messages are rendered once by [`templates::render`] and then offered to
//! an ordered list of providers by the [`NotificationDispatcher`]; the first
//! provider to accept the message wins.

mod dispatcher;
mod provider;
pub mod templates;

#[cfg(test)]
mod tests;

pub use dispatcher::NotificationDispatcher;
pub use provider::NotificationProvider;
pub use templates::{render, RenderedMessage, TemplateData};
