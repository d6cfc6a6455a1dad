//! # mjt-checker
//!
//! The asset validation pipeline.
//!
//! An [`AssetChecker`] owns one target path and an ordered log of
//! [`CheckResult`](mjt_core::CheckResult)s. Each run validates the path
//! syntax, checks existence, then runs at most one format-specific check
//! picked by extension (XML, JSON, or OBJ mesh). Asset defects become failed
//! records; nothing short of a missing target is reported as an error.
//!
//! Around the pipeline:
//! - [`batch`]: discover assets under a folder and check them in parallel,
//!   one session per file
//! - [`sanitize`]: find category meshes whose paths only work on Linux and
//!   rename them to portable paths
//! - [`model`]: preconditions for simulator scene files

pub mod batch;
mod checker;
mod error;
pub mod format;
pub mod model;
pub mod sanitize;
mod walk;

pub use checker::{AssetChecker, CheckSettings};
pub use error::CheckerError;
pub use format::AssetFormat;
