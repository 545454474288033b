//! Requested contact changes and their normalization.

use serde::{Deserialize, Serialize};

use wl_shared::utils::{email, phone};

use crate::domain::entities::user::UserContact;
use crate::errors::{DomainError, DomainResult};

/// A contact detail that can be changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Email,
    Phone,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values submitted by the user; either may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChangeInput {
    pub new_email: Option<String>,
    pub new_phone: Option<String>,
}

impl ContactChangeInput {
    pub fn email(value: impl Into<String>) -> Self {
        Self {
            new_email: Some(value.into()),
            new_phone: None,
        }
    }

    pub fn phone(value: impl Into<String>) -> Self {
        Self {
            new_email: None,
            new_phone: Some(value.into()),
        }
    }
}

/// Normalized values that differ from the user's current contact details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub new_email: Option<String>,
    pub new_phone: Option<String>,
}

impl ContactUpdate {
    /// Normalize and validate the input, keeping only the fields that change
    ///
    /// Blank values count as "not provided". A malformed email or a phone
    /// number that is not E.164 after normalization is rejected.
    pub fn between(current: &UserContact, input: &ContactChangeInput) -> DomainResult<Self> {
        let new_email = match non_blank(input.new_email.as_deref()) {
            Some(raw) => {
                let normalized = email::normalize_email(raw);
                if !email::is_valid_email(&normalized) {
                    return Err(DomainError::validation("Invalid email format"));
                }
                let unchanged = current
                    .email
                    .as_deref()
                    .map(|existing| email::normalize_email(existing) == normalized)
                    .unwrap_or(false);
                (!unchanged).then_some(normalized)
            }
            None => None,
        };

        let new_phone = match non_blank(input.new_phone.as_deref()) {
            Some(raw) => {
                let normalized = phone::normalize_phone_number(raw);
                if !phone::is_valid_phone(&normalized) {
                    return Err(DomainError::validation(
                        "Invalid phone number format, expected E.164 such as +919876543210",
                    ));
                }
                let unchanged = current
                    .phone
                    .as_deref()
                    .map(|existing| phone::normalize_phone_number(existing) == normalized)
                    .unwrap_or(false);
                (!unchanged).then_some(normalized)
            }
            None => None,
        };

        Ok(Self {
            new_email,
            new_phone,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.new_email.is_none() && self.new_phone.is_none()
    }

    /// Changed fields paired with their new values
    pub fn values(&self) -> Vec<(ContactField, &str)> {
        let mut values = Vec::with_capacity(2);
        if let Some(email) = self.new_email.as_deref() {
            values.push((ContactField::Email, email));
        }
        if let Some(phone) = self.new_phone.as_deref() {
            values.push((ContactField::Phone, phone));
        }
        values
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
