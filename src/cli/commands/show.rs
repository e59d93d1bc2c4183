use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator;
use crate::core::scheduler::ProgressSink;
use crate::errors::AppResult;
use crate::models::ProgressResult;
use crate::ui::messages::header;
use crate::ui::render::{JsonSink, RenderOptions, TerminalSink};
use chrono::Local;
use std::io::{self, IsTerminal};

/// Handle the `show` subcommand: one computation, printed and done.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { scale, all, json } = cmd {
        let now = Local::now();
        let configuration = cfg.configuration();

        let results: Vec<ProgressResult> = if *all {
            calculator::compute_all(&now, &configuration)
        } else {
            let scale = scale.unwrap_or(cfg.default_scale);
            vec![calculator::compute(scale, &now, &configuration)]
        };

        if *json {
            let mut sink = JsonSink::new(io::stdout());
            results.iter().for_each(|r| sink.on_progress_updated(r));
            return Ok(());
        }

        let opts = RenderOptions {
            bar_width: cfg.bar_width,
            color: io::stdout().is_terminal(),
            show_label: true,
        };

        if *all {
            header(now.format("%Y-%m-%d %H:%M"));
        }
        let mut sink = TerminalSink::new(io::stdout(), opts, false);
        results.iter().for_each(|r| sink.on_progress_updated(r));
    }
    Ok(())
}
