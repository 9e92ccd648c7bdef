//! Error formatting tests.

use std::error::Error;
use std::io;
use std::path::PathBuf;

use cachesim_core::common::{SimError, TraceParseError};

#[test]
fn trace_open_error_names_the_path_and_keeps_the_source() {
    let err = SimError::TraceOpen {
        path: PathBuf::from("traces/missing.trace"),
        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
    };
    let msg = err.to_string();
    assert!(msg.contains("traces/missing.trace"), "{msg}");
    assert!(msg.contains("no such file"), "{msg}");
    assert!(err.source().is_some());
}

#[test]
fn allocation_error_reports_size() {
    let err = SimError::Allocation { bytes: 1234 };
    assert_eq!(
        err.to_string(),
        "failed to allocate 1234 bytes for the cache store"
    );
}

#[test]
fn parse_errors_display() {
    assert_eq!(
        TraceParseError::MissingComma.to_string(),
        "missing ',' between address and size"
    );
    assert_eq!(
        TraceParseError::InvalidAddress("12g4".into()).to_string(),
        "invalid hexadecimal address '12g4'"
    );
    assert_eq!(
        TraceParseError::LineTooLong(300).to_string(),
        "record is 300 bytes long, limit is 256"
    );
}
