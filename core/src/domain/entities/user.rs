//! Contact details of a user, as held by the user directory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of a member profile the contact change workflow reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContact {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub display_name: Option<String>,
}

impl UserContact {
    pub fn new(id: Uuid, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            id,
            email,
            phone,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
