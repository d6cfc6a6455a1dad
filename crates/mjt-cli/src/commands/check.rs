use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use mjt_checker::{AssetChecker, CheckSettings, batch};
use mjt_config::MjtConfig;
use mjt_core::{CheckReport, CheckResult, ReportSummary};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::output::{Row, TableOptions, TableView, output, table::render_rows};
use crate::progress::Progress;

/// Records plus a summary, shared by `check` and `model`.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub summary: ReportSummary,
    pub checks: Vec<CheckResult>,
}

impl CheckResponse {
    pub fn new(report: CheckReport, output: Option<&Path>) -> Self {
        Self {
            output: output.map(|path| path.display().to_string()),
            summary: report.summary(),
            checks: report.checks,
        }
    }
}

impl Row for CheckResult {
    const HEADERS: &'static [&'static str] = &["status", "check", "filepath", "message"];

    fn cells(&self) -> Vec<String> {
        vec![
            if self.passed { "pass" } else { "fail" }.to_string(),
            self.kind.to_string(),
            self.path.clone(),
            self.message.clone(),
        ]
    }
}

impl TableView for CheckResponse {
    fn table(&self, options: TableOptions) -> String {
        let mut out = render_rows(&self.checks, options);
        out.push_str(&format!(
            "\n\n{} checks: {} passed, {} failed",
            self.summary.total, self.summary.passed, self.summary.failed
        ));
        if let Some(path) = &self.output {
            out.push_str(&format!("\nresults written to {path}"));
        }
        out
    }
}

/// Handle `mjt check`.
pub fn handle(args: &CheckArgs, config: &MjtConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = CheckSettings {
        platform: args.platform.unwrap_or(config.checks.platform),
        min_volume: args.min_volume.unwrap_or(config.checks.min_volume),
    };
    if !settings.min_volume.is_finite() || settings.min_volume < 0.0 {
        bail!("--min-volume must be a finite, non-negative number");
    }

    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.checks.output));

    let report = if let Some(folder) = &args.folder {
        let report = check_folder(folder, settings)?;
        let json = report.to_json_pretty()?;
        std::fs::write(&destination, json)
            .with_context(|| format!("failed to write {}", destination.display()))?;
        report
    } else if !args.files.is_empty() {
        let checker = check_files(&args.files, args.keep_history, settings)?;
        checker
            .export_results(&destination)
            .with_context(|| format!("failed to write {}", destination.display()))?;
        checker.report()
    } else {
        bail!("Must provide --file or --folder");
    };

    let summary = report.summary();
    tracing::info!(
        total = summary.total,
        failed = summary.failed,
        destination = %destination.display(),
        "checks complete"
    );

    output(&CheckResponse::new(report, Some(&destination)), flags.format)?;

    if args.strict && summary.failed > 0 {
        bail!("{} of {} checks failed", summary.failed, summary.total);
    }
    Ok(())
}

/// One session over every file in order. Without `keep_history` each file
/// replaces the previous file's results.
fn check_files(
    files: &[PathBuf],
    keep_history: bool,
    settings: CheckSettings,
) -> anyhow::Result<AssetChecker> {
    if files.len() > 1 && !keep_history {
        tracing::info!("--keep-history not set, only the last file's results are kept");
    }
    let mut checker = AssetChecker::with_settings(None, settings);
    for file in files {
        checker.run_all_checks(Some(file), keep_history)?;
    }
    Ok(checker)
}

fn check_folder(folder: &Path, settings: CheckSettings) -> anyhow::Result<CheckReport> {
    let assets = batch::discover_assets(folder)
        .with_context(|| format!("failed to scan {}", folder.display()))?;
    tracing::info!(folder = %folder.display(), assets = assets.len(), "checking folder");

    let progress = Progress::bar(assets.len() as u64, "checking assets");
    let report = batch::check_many_with(&assets, settings, |_| progress.inc(1));
    progress.finish_clear();
    Ok(report)
}
