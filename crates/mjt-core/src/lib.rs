//! # mjt-core
//!
//! Core types shared by every mjt crate.
//!
//! - [`kinds::CheckKind`], the closed set of validations the asset checker can run
//! - [`results::CheckResult`] and the exported [`results::CheckReport`] document
//! - [`platform::Platform`] and the path-validity oracle / sanitizer built on it
//! - Cross-cutting error types

pub mod errors;
pub mod kinds;
pub mod platform;
pub mod results;

pub use errors::CoreError;
pub use kinds::CheckKind;
pub use platform::{
    PathIssue, Platform, is_valid_filepath, sanitize_filepath, to_posix_string, validate_filepath,
};
pub use results::{CheckReport, CheckResult, ReportSummary};
