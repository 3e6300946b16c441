//! Tests for error reporting.

use crate::error::StreamError;

#[test]
fn test_underflow_names_type() {
    let err = StreamError::underflow::<u32>();
    assert_eq!(err, StreamError::Underflow { type_name: "u32" });
    assert!(err.to_string().contains("removed more times than it was added"));
}

#[test]
fn test_consistency_classification() {
    assert!(StreamError::UnknownTuple("#1".into()).is_consistency_error());
    assert!(StreamError::DuplicateTuple("#1".into()).is_consistency_error());
    assert!(!StreamError::Config("bad".into()).is_consistency_error());
}

#[test]
fn test_messages() {
    let err = StreamError::UnknownTuple("#7".into());
    assert_eq!(
        err.to_string(),
        "Impossible state: tuple #7 was retracted but is not inserted"
    );
    let err = StreamError::IndexMismatch {
        indexed: 1,
        scanned: 2,
    };
    assert_eq!(
        err.to_string(),
        "Index mismatch: indexed lookup found 1 candidates, full scan found 2"
    );
}
