//! progress-battery library root.
//! Exposes the progress calculator, the refresh scheduler, the CLI parser
//! and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(&cli.command, config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, config_path),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Watch { .. } => cli::commands::watch::handle(&cli.command, config_path),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // 2️⃣ resolve the config file, honouring --config
    let config_path = cli.config.clone().unwrap_or_else(Config::config_file);

    // 3️⃣ load it once; `watch` re-reads it on every refresh by itself and
    // falls back to defaults on a broken file
    let cfg = match &cli.command {
        Commands::Init { .. } | Commands::Watch { .. } => Config::default(),
        _ => Config::load_from(&config_path)?,
    };

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg, &config_path)
}
