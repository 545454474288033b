//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 regex is valid"));

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a normalized phone number is valid E.164
pub fn is_valid_phone(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for display (e.g., +91****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+91 98765-43210"), "+919876543210");
        assert_eq!(normalize_phone_number("(555) 010-0199"), "5550100199");
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("+15550100199"));
        assert!(!is_valid_phone("9876543210"));
        assert!(!is_valid_phone("+0123456789"));
        assert!(!is_valid_phone("+12"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+919876543210"), "+91****3210");
        assert_eq!(mask_phone_number("123"), "****");
    }
}
