use anyhow::Context;
use mjt_checker::sanitize::{
    RenameOutcome, RenamePlan, apply_renames, find_category_meshes, plan_renames,
};
use mjt_config::MjtConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SanitizeArgs;
use crate::output::{Row, TableOptions, TableView, output, table::render_rows};
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct SanitizeResponse {
    scanned: usize,
    dry_run: bool,
    renames: Vec<RenameOutcome>,
}

impl Row for RenameOutcome {
    const HEADERS: &'static [&'static str] = &["status", "from", "to", "error"];

    fn cells(&self) -> Vec<String> {
        let status = match (&self.error, self.renamed) {
            (Some(_), _) => "error",
            (None, true) => "renamed",
            (None, false) => "planned",
        };
        vec![
            status.to_string(),
            self.from.display().to_string(),
            self.to.display().to_string(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}

impl TableView for SanitizeResponse {
    fn table(&self, options: TableOptions) -> String {
        let mut out = render_rows(&self.renames, options);
        out.push_str(&format!(
            "\n\n{} category meshes scanned, {} need renaming",
            self.scanned,
            self.renames.len()
        ));
        if self.dry_run {
            out.push_str(" (dry run)");
        }
        out
    }
}

/// Handle `mjt sanitize`.
pub fn handle(args: &SanitizeArgs, config: &MjtConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let progress = Progress::spinner("scanning category meshes");
    let meshes = find_category_meshes(&args.folder, &config.sanitize.categories)
        .with_context(|| format!("failed to scan {}", args.folder.display()));
    progress.finish_clear();
    let meshes = meshes?;

    let plans = plan_renames(&meshes);
    let renames: Vec<RenameOutcome> = if args.dry_run {
        plans.into_iter().map(planned).collect()
    } else {
        apply_renames(&plans)
    };

    let failed = renames.iter().filter(|r| r.error.is_some()).count();
    tracing::info!(
        scanned = meshes.len(),
        renames = renames.len(),
        failed,
        dry_run = args.dry_run,
        "sanitize complete"
    );

    output(
        &SanitizeResponse {
            scanned: meshes.len(),
            dry_run: args.dry_run,
            renames,
        },
        flags.format,
    )
}

fn planned(plan: RenamePlan) -> RenameOutcome {
    RenameOutcome {
        from: plan.from,
        to: plan.to,
        renamed: false,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rename_status_cells() {
        let mut outcome = planned(RenamePlan {
            from: PathBuf::from("Box_1?.obj"),
            to: PathBuf::from("Box_1.obj"),
        });
        assert_eq!(outcome.cells()[0], "planned");

        outcome.renamed = true;
        assert_eq!(outcome.cells()[0], "renamed");

        outcome.renamed = false;
        outcome.error = Some("target exists".to_string());
        assert_eq!(outcome.cells(), vec!["error", "Box_1?.obj", "Box_1.obj", "target exists"]);
    }
}
