//! Unit tests for MySQL error mapping helpers

use wl_core::domain::value_objects::contact::ContactField;

use crate::database::mysql::{duplicate_contact_field, parse_uuid};

#[test]
fn test_duplicate_contact_field_from_key_name() {
    assert_eq!(
        duplicate_contact_field("Duplicate entry 'a@b.com' for key 'users.uq_users_email'"),
        Some(ContactField::Email)
    );
    assert_eq!(
        duplicate_contact_field("Duplicate entry '+919800000000' for key 'uq_users_phone'"),
        Some(ContactField::Phone)
    );
    assert_eq!(
        duplicate_contact_field("Duplicate entry 'x' for key 'PRIMARY'"),
        None
    );
}

#[test]
fn test_parse_uuid_reports_column() {
    let err = parse_uuid("not-a-uuid", "user_id").unwrap_err();
    assert!(err.to_string().contains("user_id"));
    assert!(parse_uuid("67e55044-10b1-426f-9247-bb680e5fe0c8", "id").is_ok());
}
