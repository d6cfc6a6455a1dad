//! Checker error types.
//!
//! Asset defects are never errors: they are recorded as failed
//! `CheckResult`s. These variants cover caller mistakes and I/O around the
//! pipeline itself.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
    /// `check_file` was called before any target path was set.
    #[error("Must provide a valid filepath to run the file checks")]
    NoTargetConfigured,

    #[error("Given model `{0}` doesn't exist")]
    ModelMissing(String),

    #[error("Given model `{0}` is not a single file")]
    ModelNotFile(String),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("directory walk failed: {0}")]
    Walk(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Report(#[from] mjt_core::CoreError),
}

impl From<ignore::Error> for CheckerError {
    fn from(error: ignore::Error) -> Self {
        Self::Walk(error.to_string())
    }
}
