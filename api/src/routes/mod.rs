//! Route handlers
//!
//! - `contact_change` - Request, inspect and cancel a contact change
//! - `verify` - Confirmation link target
//! - `admin` - Support operations on rate limit records

pub mod admin;
pub mod contact_change;
pub mod verify;
