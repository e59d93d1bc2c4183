use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

/// Handle the `init` subcommand
pub fn handle(cmd: &Commands, config_path: &Path) -> AppResult<()> {
    if let Commands::Init { force } = cmd {
        let cfg = Config::init_at(config_path, *force)?;

        success(format!("Config file: {}", config_path.display()));
        info(format!(
            "Birth year {} · life expectancy {} years · refresh every {}s",
            cfg.birth_year, cfg.life_expectancy, cfg.update_interval
        ));
    }
    Ok(())
}
