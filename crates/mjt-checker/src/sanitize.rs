//! Category mesh discovery and portable-path renames.
//!
//! Object meshes are named `<Category>_<n>...`. Some of them carry paths that
//! are fine on Linux but break on Windows (reserved names, `:` and friends).
//! [`plan_renames`] lists those, [`apply_renames`] moves them.

use std::fs;
use std::path::{Path, PathBuf};

use mjt_core::{Platform, is_valid_filepath, sanitize_filepath};
use serde::Serialize;

use crate::error::CheckerError;
use crate::format::AssetFormat;
use crate::walk::walk_files;

/// `stem` starts with `<category>_` followed by at least one digit.
#[must_use]
pub fn matches_category(stem: &str, category: &str) -> bool {
    stem.strip_prefix(category)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// OBJ files under `root` whose stem matches any of `categories`.
///
/// # Errors
///
/// Same as [`discover_assets`](crate::batch::discover_assets).
pub fn find_category_meshes(
    root: &Path,
    categories: &[String],
) -> Result<Vec<PathBuf>, CheckerError> {
    let meshes: Vec<PathBuf> = walk_files(root)?
        .into_iter()
        .filter(|path| AssetFormat::from_path(path) == Some(AssetFormat::Mesh))
        .filter(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy())
                .is_some_and(|stem| categories.iter().any(|c| matches_category(&stem, c)))
        })
        .collect();
    tracing::debug!(root = %root.display(), meshes = meshes.len(), "found category meshes");
    Ok(meshes)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Plans for every path that is valid on Linux but not on Windows.
///
/// Paths invalid even on Linux are left alone, as are paths whose
/// sanitized form is unchanged.
#[must_use]
pub fn plan_renames(paths: &[PathBuf]) -> Vec<RenamePlan> {
    paths
        .iter()
        .filter(|path| {
            is_valid_filepath(path, Platform::Linux) && !is_valid_filepath(path, Platform::Windows)
        })
        .filter_map(|path| {
            let to = sanitize_filepath(path, Platform::Universal);
            (to != *path).then(|| RenamePlan {
                from: path.clone(),
                to,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    pub from: PathBuf,
    pub to: PathBuf,
    pub renamed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Execute `plans` in order. A failed rename is recorded and the batch
/// carries on.
#[must_use]
pub fn apply_renames(plans: &[RenamePlan]) -> Vec<RenameOutcome> {
    plans
        .iter()
        .map(|plan| {
            let error = rename_one(plan).err();
            if let Some(error) = &error {
                tracing::warn!(
                    from = %plan.from.display(),
                    to = %plan.to.display(),
                    %error,
                    "rename failed"
                );
            } else {
                tracing::debug!(from = %plan.from.display(), to = %plan.to.display(), "renamed");
            }
            RenameOutcome {
                from: plan.from.clone(),
                to: plan.to.clone(),
                renamed: error.is_none(),
                error,
            }
        })
        .collect()
}

fn rename_one(plan: &RenamePlan) -> Result<(), String> {
    if let Some(parent) = plan.to.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    if plan.to.exists() {
        return Err(format!("target `{}` already exists", plan.to.display()));
    }
    fs::rename(&plan.from, &plan.to).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Box_1", "Box", true)]
    #[case("Box_12_part", "Box", true)]
    #[case("Box_", "Box", false)]
    #[case("Box_a", "Box", false)]
    #[case("Boxes_1", "Box", false)]
    #[case("Side_Table_3", "Side_Table", true)]
    #[case("box_1", "Box", false)]
    fn category_stems(#[case] stem: &str, #[case] category: &str, #[case] expected: bool) {
        assert_eq!(matches_category(stem, category), expected);
    }

    #[test]
    fn finds_only_category_objs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Box")).unwrap();
        for file in ["Box/Box_1.obj", "Box/Box_1.xml", "Box/Lid.obj", "Desk_2.OBJ"] {
            fs::write(root.join(file), "").unwrap();
        }
        let categories = vec!["Box".to_string(), "Desk".to_string()];

        let found: Vec<PathBuf> = find_category_meshes(root, &categories)
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(found, vec![PathBuf::from("Box/Box_1.obj"), PathBuf::from("Desk_2.OBJ")]);
    }

    #[test]
    fn plans_only_windows_invalid_paths() {
        let paths = vec![
            PathBuf::from("assets/Box_1.obj"),
            PathBuf::from("assets/Box_2:part.obj"),
            PathBuf::from("assets/Box_3?.obj"),
        ];

        let plans = plan_renames(&paths);

        assert_eq!(
            plans,
            vec![
                RenamePlan {
                    from: PathBuf::from("assets/Box_2:part.obj"),
                    to: PathBuf::from("assets/Box_2part.obj"),
                },
                RenamePlan {
                    from: PathBuf::from("assets/Box_3?.obj"),
                    to: PathBuf::from("assets/Box_3.obj"),
                },
            ]
        );
    }

    #[test]
    fn apply_renames_and_reports_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Box_1?.obj"), "a").unwrap();
        fs::write(root.join("Box_2?.obj"), "b").unwrap();
        fs::write(root.join("Box_2.obj"), "existing").unwrap();

        let plans = plan_renames(&[root.join("Box_1?.obj"), root.join("Box_2?.obj")]);
        let outcomes = apply_renames(&plans);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].renamed);
        assert_eq!(fs::read_to_string(root.join("Box_1.obj")).unwrap(), "a");
        assert!(!outcomes[1].renamed);
        assert!(outcomes[1].error.as_deref().unwrap().contains("already exists"));
        assert_eq!(fs::read_to_string(root.join("Box_2.obj")).unwrap(), "existing");
    }
}
