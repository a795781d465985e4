use credcheck::credentials::{CredentialsDocument, REQUIRED_KEYS};
use credcheck::error::CredCheckError;
use credcheck::verifier::FailureKind;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_extra_keys_allowed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sa.json");
    fs::write(
        &path,
        r#"{"type": "service_account", "project_id": "p", "private_key": "k", "client_email": "e", "universe_domain": "googleapis.com"}"#,
    ).unwrap();

    let doc = CredentialsDocument::load(&path).unwrap();
    assert_eq!(doc.project_id(), Some("p"));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let err = CredentialsDocument::load(&path).unwrap_err();
    assert!(matches!(err, CredCheckError::CredentialsNotFound(_)));
    assert_eq!(err.kind(), FailureKind::MissingResource);
}

#[test]
fn test_load_non_object_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, "[]").unwrap();

    match CredentialsDocument::load(&path).unwrap_err() {
        CredCheckError::InvalidJson { path: reported, reason } => {
            assert_eq!(reported, path.display().to_string());
            assert!(reason.contains("an array"));
        }
        other => panic!("Expected InvalidJson, got {:?}", other),
    }
}

#[test]
fn test_load_empty_object_lists_every_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "{}").unwrap();

    match CredentialsDocument::load(&path).unwrap_err() {
        CredCheckError::MissingKeys(keys) => {
            let expected: Vec<String> = REQUIRED_KEYS.iter().map(|k| k.to_string()).collect();
            assert_eq!(keys, expected);
        }
        other => panic!("Expected MissingKeys, got {:?}", other),
    }
}

#[test]
fn test_load_invalid_utf8_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binary.json");
    fs::write(&path, b"{\xff\xfe}").unwrap();

    let err = CredentialsDocument::load(&path).unwrap_err();
    assert!(matches!(err, CredCheckError::InvalidJson { .. }));
    assert_eq!(err.kind(), FailureKind::MalformedInput);
}
