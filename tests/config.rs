//! Credential blob decoding tests

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use payhook::config::{ConfigError, StoreCredentials};

#[test]
fn valid_blob_decodes() {
    let blob = BASE64.encode(r#"{"database_path":"/var/lib/payhook/store.db"}"#);

    let creds = StoreCredentials::from_base64(&blob).unwrap();
    assert_eq!(creds.database_path, "/var/lib/payhook/store.db");
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let blob = format!("  {}\n", BASE64.encode(r#"{"database_path":"store.db"}"#));

    let creds = StoreCredentials::from_base64(&blob).unwrap();
    assert_eq!(creds.database_path, "store.db");
}

#[test]
fn invalid_base64_is_rejected() {
    let err = StoreCredentials::from_base64("not base64 at all!!!").unwrap_err();
    assert!(matches!(err, ConfigError::CredentialsEncoding(_)));
}

#[test]
fn invalid_json_is_rejected() {
    let blob = BASE64.encode("this is not json");
    let err = StoreCredentials::from_base64(&blob).unwrap_err();
    assert!(matches!(err, ConfigError::CredentialsFormat(_)));
}

#[test]
fn missing_required_field_is_rejected() {
    let blob = BASE64.encode(r#"{"project":"payhook"}"#);
    let err = StoreCredentials::from_base64(&blob).unwrap_err();
    assert!(matches!(err, ConfigError::CredentialsFormat(_)));
}
