use crate::cli::parser::Commands;
use crate::core::runtime::{WatchOptions, run_watch};
use crate::errors::AppResult;
use std::path::Path;

/// Handle the `watch` subcommand
pub fn handle(cmd: &Commands, config_path: &Path) -> AppResult<()> {
    if let Commands::Watch { scale, json } = cmd {
        run_watch(WatchOptions {
            config_path: config_path.to_path_buf(),
            scale: *scale,
            json: *json,
        })?;
    }
    Ok(())
}
