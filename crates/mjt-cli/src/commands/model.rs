use anyhow::Context;
use mjt_checker::{AssetChecker, CheckSettings, model::ensure_model_file};
use mjt_config::MjtConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ModelArgs;
use crate::commands::check::CheckResponse;
use crate::output::output;

/// Handle `mjt model`.
pub fn handle(args: &ModelArgs, config: &MjtConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    ensure_model_file(&args.model)?;

    let settings = CheckSettings {
        platform: config.checks.platform,
        min_volume: config.checks.min_volume,
    };
    let mut checker = AssetChecker::with_settings(None, settings);
    checker
        .run_all_checks(Some(&args.model), false)
        .with_context(|| format!("failed to check {}", args.model.display()))?;

    output(&CheckResponse::new(checker.report(), None), flags.format)
}
