//! Rate limit repository module.

mod r#trait;
pub use r#trait::RateLimitRepository;

mod mock;
pub use mock::MockRateLimitRepository;

#[cfg(test)]
mod tests;
