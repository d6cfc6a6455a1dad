use mjt_config::MjtConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod check;
pub mod model;
pub mod sanitize;

/// Route a parsed command to its handler.
pub fn dispatch(command: &Commands, config: &MjtConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Check(args) => check::handle(args, config, flags),
        Commands::Sanitize(args) => sanitize::handle(args, config, flags),
        Commands::Model(args) => model::handle(args, config, flags),
    }
}
