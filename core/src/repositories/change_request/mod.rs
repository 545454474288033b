//! Change request repository module.

mod r#trait;
pub use r#trait::ChangeRequestRepository;

mod mock;
pub use mock::MockChangeRequestRepository;
