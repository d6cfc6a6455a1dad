use std::path::PathBuf;

use clap::{Args, Subcommand};
use mjt_core::Platform;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate asset files and export the check results.
    Check(CheckArgs),
    /// Rename category meshes whose paths are not portable to Windows.
    Sanitize(SanitizeArgs),
    /// Verify a simulator scene file and run the asset checks on it.
    Model(ModelArgs),
}

/// Arguments for `mjt check`.
#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// File to check; repeat to check several files in one session.
    #[arg(long = "file", conflicts_with = "folder")]
    pub files: Vec<PathBuf>,
    /// Check every xml, json and obj file under this folder.
    #[arg(long)]
    pub folder: Option<PathBuf>,
    /// Where to write the results (defaults to `checks.output`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Accumulate results across files instead of keeping only the last run.
    #[arg(long)]
    pub keep_history: bool,
    /// Exit with an error when any check failed.
    #[arg(long)]
    pub strict: bool,
    /// Path rules to validate against (defaults to `checks.platform`).
    #[arg(long)]
    pub platform: Option<Platform>,
    /// Minimum mesh volume (defaults to `checks.min_volume`).
    #[arg(long)]
    pub min_volume: Option<f64>,
}

/// Arguments for `mjt sanitize`.
#[derive(Clone, Debug, Args)]
pub struct SanitizeArgs {
    /// Asset folder to scan for category meshes.
    #[arg(long)]
    pub folder: PathBuf,
    /// Print the planned renames without touching any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `mjt model`.
#[derive(Clone, Debug, Args)]
pub struct ModelArgs {
    /// Path to the MJCF scene file.
    #[arg(long)]
    pub model: PathBuf,
}
