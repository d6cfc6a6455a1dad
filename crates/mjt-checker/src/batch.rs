//! Folder discovery and parallel validation of many assets.

use std::path::{Path, PathBuf};

use mjt_core::{CheckReport, CheckResult};
use rayon::prelude::*;

use crate::checker::{AssetChecker, CheckSettings};
use crate::error::CheckerError;
use crate::format::AssetFormat;
use crate::walk::walk_files;

/// Every file under `root` that has a format-specific check (xml, json, obj).
///
/// # Errors
///
/// [`CheckerError::NotADirectory`] when `root` is not a directory and
/// [`CheckerError::Walk`] when an entry below it cannot be read.
pub fn discover_assets(root: &Path) -> Result<Vec<PathBuf>, CheckerError> {
    let assets: Vec<PathBuf> = walk_files(root)?
        .into_iter()
        .filter(|path| AssetFormat::from_path(path).is_some())
        .collect();
    tracing::debug!(root = %root.display(), assets = assets.len(), "discovered assets");
    Ok(assets)
}

/// Run the full pipeline on each path with its own session.
///
/// Sessions run on the rayon pool; results are concatenated in input order.
#[must_use]
pub fn check_many(paths: &[PathBuf], settings: CheckSettings) -> CheckReport {
    check_many_with(paths, settings, |_| {})
}

/// Like [`check_many`], calling `on_done` once per finished file (from any
/// worker thread). Used to drive progress output.
pub fn check_many_with<F>(paths: &[PathBuf], settings: CheckSettings, on_done: F) -> CheckReport
where
    F: Fn(&Path) + Sync,
{
    let per_file: Vec<Vec<CheckResult>> = paths
        .par_iter()
        .map(|path| {
            let mut checker = AssetChecker::with_settings(Some(path.clone()), settings);
            if let Err(error) = checker.check_file(None) {
                tracing::warn!(path = %path.display(), %error, "asset check did not run");
            }
            on_done(path);
            checker.into_results()
        })
        .collect();

    CheckReport::new(per_file.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mjt_core::CheckKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn discovery_keeps_checkable_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("meshes")).unwrap();
        for file in ["scene.xml", "meta.json", "meshes/Box_1.OBJ", "notes.txt", "tex.png"] {
            fs::write(root.join(file), "").unwrap();
        }

        let names: Vec<String> = discover_assets(root)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["Box_1.OBJ", "meta.json", "scene.xml"]);
    }

    #[test]
    fn results_follow_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, "[1, 2, 3]").unwrap();
        fs::write(&bad, "[1, 2").unwrap();
        let missing = dir.path().join("missing.xml");

        let paths = vec![bad.clone(), missing.clone(), good.clone()];
        let report = check_many(&paths, CheckSettings::default());

        let kinds: Vec<(CheckKind, bool)> =
            report.checks.iter().map(|r| (r.kind, r.passed)).collect();
        assert_eq!(
            kinds,
            vec![
                (CheckKind::FilePathValid, true),
                (CheckKind::FileExists, true),
                (CheckKind::FileJsonCanOpen, false),
                (CheckKind::FilePathValid, true),
                (CheckKind::FileExists, false),
                (CheckKind::FilePathValid, true),
                (CheckKind::FileExists, true),
                (CheckKind::FileJsonCanOpen, true),
            ]
        );
        assert_eq!(report.summary().failed, 2);
    }

    #[test]
    fn every_path_is_checked_and_reported_done() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, "{}").unwrap();
        let done = AtomicUsize::new(0);

        let paths = vec![PathBuf::new(), good];
        let report = check_many_with(&paths, CheckSettings::default(), |_| {
            done.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(done.load(Ordering::Relaxed), 2);
        let first = &report.checks[0];
        assert_eq!(first.kind, CheckKind::FilePathValid);
        assert!(!first.passed);
        assert_eq!(report.checks.last().unwrap().kind, CheckKind::FileJsonCanOpen);
    }
}
