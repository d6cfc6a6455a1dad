//! Recursive file listing for folder-level operations.
//!
//! Uses the `ignore` crate's walker with every standard filter disabled:
//! asset folders are audited in full, including hidden and git-ignored
//! files. Symlinks are not followed.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::CheckerError;

/// Every regular file under `root`, in path order.
pub(crate) fn walk_files(root: &Path) -> Result<Vec<PathBuf>, CheckerError> {
    if !root.is_dir() {
        return Err(CheckerError::NotADirectory(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_path(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
