#![allow(dead_code)]

// tests/common/mod.rs
use partyroom::errors::ErrorCode;
use partyroom::AppError;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert that a service call failed with the given error code.
pub fn assert_code<T: std::fmt::Debug>(result: Result<T, AppError>, expected: ErrorCode) {
    match result {
        Ok(value) => panic!("expected {expected:?}, got Ok({value:?})"),
        Err(err) => assert_eq!(err.code(), expected, "unexpected error: {err:?}"),
    }
}
