//! Shared helpers for backend tests: logging init and Problem Details assertions.

pub mod logging;
pub mod problem_details;
