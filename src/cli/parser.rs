use crate::models::TimeScale;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for progress-battery
#[derive(Parser)]
#[command(
    name = "progress-battery",
    version = env!("CARGO_PKG_VERSION"),
    about = "Show how much of the current hour, day, month, year or life has elapsed",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or multiple profiles)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr (RUST_LOG still takes precedence)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file with default preferences
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view, check, edit, get/set keys)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report keys missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,

        #[arg(long = "get", value_name = "KEY", help = "Print a single preference")]
        get: Option<String>,

        #[arg(
            long = "set",
            num_args = 2,
            value_names = ["KEY", "VALUE"],
            help = "Update a single preference (e.g. --set update_interval 5m)"
        )]
        set: Option<Vec<String>>,
    },

    /// Print the current progress once
    Show {
        /// Time scale: hour, day, month, year, life (or h/d/m/y/l)
        #[arg(long, short, value_enum)]
        scale: Option<TimeScale>,

        #[arg(long, short, conflicts_with = "scale", help = "Show every scale")]
        all: bool,

        #[arg(long, help = "Emit JSON lines instead of a text bar")]
        json: bool,
    },

    /// Keep the progress on screen, refreshing at the configured interval.
    ///
    /// Reads commands from stdin while running:
    ///   hour|day|month|year|life (or h/d/m/y/l)  select a scale
    ///   next                                      cycle to the next scale
    ///   interval <30s|1m|5m|SECS>                 change and save the refresh interval
    ///   refresh                                   recompute now
    ///   quit                                      exit
    #[command(verbatim_doc_comment)]
    Watch {
        #[arg(long, short, value_enum)]
        scale: Option<TimeScale>,

        #[arg(long, help = "Emit JSON lines (one per refresh) for status bars")]
        json: bool,
    },
}
