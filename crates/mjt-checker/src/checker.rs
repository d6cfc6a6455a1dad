//! The check session and its fixed pipeline.
//!
//! ```text
//! path valid ──▶ exists ──┬─ missing: stop
//!                         ├─ .xml  ──▶ xml parse
//!                         ├─ .json ──▶ json parse
//!                         └─ .obj  ──▶ opens ──▶ watertight ──▶ volume (recorded only on failure)
//! ```
//!
//! The volume step fails without computing anything when the faces of a
//! closed mesh are not consistently wound.

use std::path::{Path, PathBuf};

use mjt_core::{
    CheckKind, CheckReport, CheckResult, Platform, to_posix_string, validate_filepath,
};

use crate::error::CheckerError;
use crate::format::{self, AssetFormat};

/// Default minimum enclosed volume for watertight meshes.
pub const DEFAULT_MIN_VOLUME: f64 = 1e-6;

/// Knobs for one session's checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckSettings {
    /// Path syntax rules used by the path validity check.
    pub platform: Platform,
    /// Watertight meshes strictly below this volume fail.
    pub min_volume: f64,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            min_volume: DEFAULT_MIN_VOLUME,
        }
    }
}

/// One target path plus the ordered log of results produced against it.
///
/// Not meant to be shared across threads; run one session per file to
/// validate files in parallel.
#[derive(Debug, Clone, Default)]
pub struct AssetChecker {
    target: Option<PathBuf>,
    results: Vec<CheckResult>,
    settings: CheckSettings,
}

impl AssetChecker {
    #[must_use]
    pub fn new(target: Option<PathBuf>) -> Self {
        Self::with_settings(target, CheckSettings::default())
    }

    #[must_use]
    pub const fn with_settings(target: Option<PathBuf>, settings: CheckSettings) -> Self {
        Self {
            target,
            results: Vec::new(),
            settings,
        }
    }

    /// Replace the active path. Nothing is validated here.
    pub fn set_target(&mut self, path: impl Into<PathBuf>) {
        self.target = Some(path.into());
    }

    #[must_use]
    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    #[must_use]
    pub const fn settings(&self) -> CheckSettings {
        self.settings
    }

    /// Results in execution order, across every run since the last clear.
    #[must_use]
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    #[must_use]
    pub fn report(&self) -> CheckReport {
        CheckReport::new(self.results.clone())
    }

    #[must_use]
    pub fn into_results(self) -> Vec<CheckResult> {
        self.results
    }

    /// Run the pipeline, optionally on a new target.
    ///
    /// Previous results are discarded unless `keep_history` is set.
    ///
    /// # Errors
    ///
    /// [`CheckerError::NoTargetConfigured`] when neither `path` nor a
    /// previous target is available.
    pub fn run_all_checks(
        &mut self,
        path: Option<&Path>,
        keep_history: bool,
    ) -> Result<(), CheckerError> {
        if let Some(path) = path {
            self.target = Some(path.to_path_buf());
        }
        if !keep_history {
            self.results.clear();
        }
        self.check_file(None)
    }

    /// Run the pipeline against `path` (which becomes the target) or the
    /// current target, appending one record per evaluated check.
    ///
    /// # Errors
    ///
    /// [`CheckerError::NoTargetConfigured`] when there is no path to check;
    /// nothing is recorded in that case. Asset defects never produce errors.
    pub fn check_file(&mut self, path: Option<&Path>) -> Result<(), CheckerError> {
        if let Some(path) = path {
            self.target = Some(path.to_path_buf());
        }
        let Some(target) = self.target.clone() else {
            tracing::warn!("no target path configured, skipping file checks");
            return Err(CheckerError::NoTargetConfigured);
        };

        let mut run = Run::new(&target, &mut self.results);
        run.path_valid(self.settings.platform);
        if !run.exists() {
            return Ok(());
        }

        match AssetFormat::from_path(&target) {
            Some(AssetFormat::Xml) => run.xml(),
            Some(AssetFormat::Json) => run.json(),
            Some(AssetFormat::Mesh) => run.mesh(self.settings.min_volume),
            None => {}
        }
        Ok(())
    }

    /// Write the accumulated results as a `{"checks": [...]}` document.
    ///
    /// # Errors
    ///
    /// [`CheckerError::Report`] if the results cannot be serialized and
    /// [`CheckerError::Io`] if `destination` cannot be written.
    pub fn export_results(&self, destination: &Path) -> Result<(), CheckerError> {
        let json = self.report().to_json_pretty()?;
        std::fs::write(destination, json)?;
        tracing::debug!(
            destination = %destination.display(),
            checks = self.results.len(),
            "exported check results"
        );
        Ok(())
    }
}

/// A single pipeline pass. Every record carries the path active when the
/// pass started.
struct Run<'a> {
    target: &'a Path,
    posix: String,
    name: String,
    results: &'a mut Vec<CheckResult>,
}

impl<'a> Run<'a> {
    fn new(target: &'a Path, results: &'a mut Vec<CheckResult>) -> Self {
        let posix = to_posix_string(target);
        let name = target
            .file_name()
            .map_or_else(|| posix.clone(), |n| n.to_string_lossy().into_owned());
        Self {
            target,
            posix,
            name,
            results,
        }
    }

    fn pass(&mut self, kind: CheckKind) {
        tracing::debug!(check = %kind, path = %self.posix, "check passed");
        self.results.push(CheckResult::pass(kind, self.posix.clone()));
    }

    fn fail(&mut self, kind: CheckKind, message: String, detail: String) {
        tracing::debug!(check = %kind, path = %self.posix, %message, "check failed");
        self.results
            .push(CheckResult::fail(kind, self.posix.clone(), message, detail));
    }

    fn path_valid(&mut self, platform: Platform) {
        match validate_filepath(self.target, platform) {
            Ok(()) => self.pass(CheckKind::FilePathValid),
            Err(issue) => self.fail(
                CheckKind::FilePathValid,
                format!("Filepath @ {} is not valid", self.posix),
                issue.to_string(),
            ),
        }
    }

    fn exists(&mut self) -> bool {
        let (exists, detail) = match self.target.try_exists() {
            Ok(exists) => (exists, String::new()),
            Err(error) => (false, format!("Error: {error}")),
        };
        if exists {
            self.pass(CheckKind::FileExists);
        } else {
            self.fail(
                CheckKind::FileExists,
                format!("File {} doesn't exist", self.posix),
                detail,
            );
        }
        exists
    }

    fn xml(&mut self) {
        match format::probe_xml(self.target) {
            Ok(()) => self.pass(CheckKind::FileXmlCanOpen),
            Err(error) => self.fail(
                CheckKind::FileXmlCanOpen,
                format!("XML file @ {} can't be parsed", self.name),
                error.detail(),
            ),
        }
    }

    fn json(&mut self) {
        match format::probe_json(self.target) {
            Ok(()) => self.pass(CheckKind::FileJsonCanOpen),
            Err(error) => self.fail(
                CheckKind::FileJsonCanOpen,
                format!("JSON file @ {} can't be parsed", self.name),
                error.detail(),
            ),
        }
    }

    fn mesh(&mut self, min_volume: f64) {
        let unopenable = format!("OBJ file @ {} can't be opened", self.name);
        let mesh = match mjt_mesh::load_obj(self.target) {
            Ok(mesh) if mesh.is_empty() => {
                self.fail(
                    CheckKind::FileObjCanOpen,
                    unopenable,
                    "mesh has no geometry".to_string(),
                );
                return;
            }
            Ok(mesh) => mesh,
            Err(error) => {
                self.fail(CheckKind::FileObjCanOpen, unopenable, error.to_string());
                return;
            }
        };
        self.pass(CheckKind::FileObjCanOpen);

        if !mesh.is_watertight() {
            let stats = mesh.edge_stats();
            self.fail(
                CheckKind::FileMeshIsWatertight,
                format!("3d mesh file @ {} is not watertight", self.name),
                format!(
                    "boundary edges: {}, non-manifold edges: {}",
                    stats.boundary, stats.non_manifold
                ),
            );
            return;
        }
        self.pass(CheckKind::FileMeshIsWatertight);

        // The tetrahedron sum is only a volume when all faces agree on winding.
        let misoriented = mesh.misoriented_edges();
        if misoriented > 0 {
            self.fail(
                CheckKind::FileMeshVolumeTooSmall,
                format!("3d mesh file @ {} volume can't be computed", self.name),
                format!(
                    "inconsistent winding: {misoriented} directed edges reused, mesh is not orientable"
                ),
            );
            return;
        }

        // A passing volume check leaves no record.
        let volume = mesh.volume();
        if volume < min_volume {
            self.fail(
                CheckKind::FileMeshVolumeTooSmall,
                format!("3d mesh file @ {} has too small volume", self.name),
                format!("volume: {volume:e}, minimum: {min_volume:e}"),
            );
        }
    }
}
