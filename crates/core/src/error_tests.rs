// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    missing_uid = { Error::MissingUid, "missing uid" },
    field_empty = { Error::FieldEmpty { field: "content" }, "content cannot be empty" },
    not_found = { Error::NotFound { collection: "complaints".into(), id: "abc".into() }, "complaints/abc" },
    unavailable = { Error::StoreUnavailable("lock poisoned".into()), "lock poisoned" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[parameterized(
    missing_uid = { Error::MissingUid, ErrorKind::Validation },
    field_empty = { Error::FieldEmpty { field: "content" }, ErrorKind::Validation },
    not_found = { Error::NotFound { collection: "c".into(), id: "x".into() }, ErrorKind::Store },
    corrupted = { Error::CorruptedData("bad".into()), ErrorKind::Store },
    classifier = { Error::Classifier("down".into()), ErrorKind::Classifier },
    config = { Error::Config("bad".into()), ErrorKind::Config },
)]
fn error_kind(err: Error, expected: ErrorKind) {
    assert_eq!(err.kind(), expected);
}

#[test]
fn status_update_names_the_failed_step() {
    let err = Error::StatusUpdate {
        step: UpdateStep::HistoryAppend,
        source: Box::new(Error::StoreUnavailable("offline".into())),
    };
    let msg = err.to_string();
    assert!(msg.contains("history append"));
    assert!(msg.contains("offline"));
    assert_eq!(err.kind(), ErrorKind::Store);
}

#[test]
fn error_from_json_is_store_kind() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
    assert_eq!(err.kind(), ErrorKind::Store);
}

#[test]
fn error_from_io_is_config_kind() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn error_kind_as_str() {
    assert_eq!(ErrorKind::Validation.as_str(), "validation");
    assert_eq!(ErrorKind::Store.to_string(), "store");
}
