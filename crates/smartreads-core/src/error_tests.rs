//! Tests for engine error types.

use crate::error::Error;

#[test]
fn test_error_display() {
    assert_eq!(Error::ItemNotFound(12).to_string(), "Book 12 not found");
    assert_eq!(Error::EmptyCatalog.to_string(), "Catalog is empty");
    assert!(Error::UnknownAlgorithm("svm".to_string())
        .to_string()
        .contains("svm"));
    assert_eq!(
        Error::InvalidParameter("count must be a positive integer".to_string()).to_string(),
        "Invalid parameter: count must be a positive integer"
    );
}

#[test]
fn test_error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_error_from_json() {
    let json_err = serde_json::from_str::<u64>("nope").expect_err("invalid json");
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
