//! Host event loop for `watch`.
//!
//! A single-threaded tokio runtime serializes every input onto one
//! timeline: the armed refresh deadline, stdin commands, config file
//! change events and Ctrl-C. The scheduler is only ever touched from this
//! loop, so it needs no locking.

use crate::config::{Config, FileConfigProvider};
use crate::core::scheduler::{
    ProgressSink, RefreshScheduler, SchedulerError, SchedulerState, SystemClock, Timer,
    TimerHandle,
};
use crate::errors::{AppError, AppResult};
use crate::models::TimeScale;
use crate::ui::messages;
use crate::ui::render::{JsonSink, RenderOptions, TerminalSink};
use crate::utils::time::{format_interval, parse_interval};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, warn};

/// Wait before re-arming after the timer refused a wake-up.
const ARM_RETRY_DELAY: Duration = Duration::from_secs(5);

// ---------------------------
// Timer
// ---------------------------

/// Production timer: remembers a single deadline that the event loop
/// sleeps on. Arming replaces it; cancelling a stale handle is a no-op.
#[derive(Debug, Default)]
pub struct DeadlineTimer {
    generation: u64,
    armed: Option<(TimerHandle, Instant)>,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|(_, at)| at)
    }

    /// The deadline fired: forget it so a failed re-arm leaves nothing to
    /// wait on.
    pub fn expire(&mut self) {
        self.armed = None;
    }
}

impl Timer for DeadlineTimer {
    fn arm(&mut self, delay: Duration) -> Result<TimerHandle, SchedulerError> {
        let at = Instant::now()
            .checked_add(delay)
            .ok_or_else(|| SchedulerError::ArmFailed(format!("delay {:?} out of range", delay)))?;

        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.armed = Some((handle, at));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.armed, Some((current, _)) if current == handle) {
            self.armed = None;
        }
    }
}

// ---------------------------
// Stdin commands
// ---------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WatchCommand {
    Select(TimeScale),
    Next,
    Interval(Duration),
    Refresh,
    Quit,
}

pub fn parse_command(line: &str) -> AppResult<Option<WatchCommand>> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };

    let cmd = match head.to_lowercase().as_str() {
        "q" | "quit" | "exit" => WatchCommand::Quit,
        "n" | "next" => WatchCommand::Next,
        "r" | "refresh" => WatchCommand::Refresh,
        "i" | "interval" => {
            let arg = parts
                .next()
                .ok_or_else(|| AppError::InvalidInterval("missing value".into()))?;
            WatchCommand::Interval(parse_interval(arg)?)
        }
        other => WatchCommand::Select(
            TimeScale::from_code(other).ok_or_else(|| AppError::InvalidScale(other.into()))?,
        ),
    };
    Ok(Some(cmd))
}

// ---------------------------
// Loop
// ---------------------------

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub config_path: PathBuf,
    pub scale: Option<TimeScale>,
    pub json: bool,
}

pub fn run_watch(opts: WatchOptions) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let provider = FileConfigProvider::new(&opts.config_path);
    let cfg = provider.load();
    let scale = opts.scale.unwrap_or(cfg.default_scale);

    if opts.json {
        let sink = JsonSink::new(std::io::stdout());
        runtime.block_on(watch_loop(provider, sink, scale))
    } else {
        let in_place = std::io::stdout().is_terminal();
        let render = RenderOptions {
            bar_width: cfg.bar_width,
            color: in_place,
            show_label: true,
        };
        let sink = TerminalSink::new(std::io::stdout(), render, in_place);
        let result = runtime.block_on(watch_loop(provider, sink, scale));
        if in_place {
            println!();
        }
        result
    }
}

async fn watch_loop<S: ProgressSink>(
    provider: FileConfigProvider,
    sink: S,
    scale: TimeScale,
) -> AppResult<()> {
    let config_path = provider.path().to_path_buf();
    let mut last_interval = provider.load().update_interval;

    let (changed_tx, mut changed_rx) = mpsc::unbounded_channel::<()>();
    // Dropping the watcher stops the events, keep it alive for the loop.
    let _watcher = match watch_config(&config_path, changed_tx) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(event = "watch.config_watcher.unavailable", error = %e);
            None
        }
    };

    let mut scheduler = RefreshScheduler::new(
        provider,
        SystemClock,
        DeadlineTimer::new(),
        sink,
        scale,
    );
    let mut retry_at: Option<Instant> = None;
    if let Err(e) = scheduler.start() {
        report_arm_failure(&e);
        retry_at = Some(Instant::now() + ARM_RETRY_DELAY);
    }
    info!(event = "watch.started", scale = scale.code(), config = %config_path.display());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let deadline = scheduler.timer().deadline();

        tokio::select! {
            _ = wait_until(deadline) => {
                scheduler.timer_mut().expire();
                if let Err(e) = scheduler.tick() {
                    report_arm_failure(&e);
                    retry_at = Some(Instant::now() + ARM_RETRY_DELAY);
                }
            }
            _ = wait_until(retry_at) => {
                retry_at = None;
                if scheduler.state() == SchedulerState::Idle
                    && let Err(e) = scheduler.start()
                {
                    report_arm_failure(&e);
                    retry_at = Some(Instant::now() + ARM_RETRY_DELAY);
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Ok(Some(WatchCommand::Quit)) => break,
                        Ok(Some(cmd)) => {
                            if let Err(e) = apply_command(&mut scheduler, cmd, &config_path, &mut last_interval) {
                                warn!(event = "watch.command.failed", error = %e);
                            }
                        }
                        Ok(None) => {}
                        Err(e) => warn!(event = "watch.command.invalid", input = %line.trim(), error = %e),
                    },
                    Ok(None) => {
                        debug!(event = "watch.stdin.closed");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!(event = "watch.stdin.read_failed", error = %e);
                        stdin_open = false;
                    }
                }
            }
            Some(()) = changed_rx.recv() => {
                on_config_changed(&mut scheduler, &config_path, &mut last_interval);
            }
            _ = &mut ctrl_c => {
                debug!(event = "watch.interrupted");
                break;
            }
        }
    }

    scheduler.shutdown();
    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

type WatchScheduler<S> = RefreshScheduler<FileConfigProvider, SystemClock, DeadlineTimer, S>;

fn apply_command<S: ProgressSink>(
    scheduler: &mut WatchScheduler<S>,
    cmd: WatchCommand,
    config_path: &Path,
    last_interval: &mut f64,
) -> AppResult<()> {
    match cmd {
        WatchCommand::Select(scale) => scheduler.select_scale(scale),
        WatchCommand::Next => scheduler.select_scale(scheduler.selected_scale().next()),
        WatchCommand::Refresh => scheduler.select_scale(scheduler.selected_scale()),
        WatchCommand::Interval(interval) => {
            let secs = interval.as_secs_f64();
            let mut cfg = Config::load_from(config_path)?;
            cfg.update_interval = secs;
            cfg.save_to(config_path)?;
            *last_interval = secs;

            info!(event = "watch.interval.updated", interval = %format_interval(interval));
            scheduler.on_interval_changed(secs)?;
        }
        WatchCommand::Quit => {}
    }
    Ok(())
}

/// The file changed under us: move the cadence if the interval moved, and
/// recompute at once so birth year / life expectancy edits show immediately.
fn on_config_changed<S: ProgressSink>(
    scheduler: &mut WatchScheduler<S>,
    config_path: &Path,
    last_interval: &mut f64,
) {
    let cfg = match Config::load_from(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(event = "watch.config.reload_failed", error = %e);
            return;
        }
    };

    if cfg.update_interval != *last_interval {
        *last_interval = cfg.update_interval;
        if let Err(e) = scheduler.on_interval_changed(cfg.update_interval) {
            report_arm_failure(&e);
        }
    }
    scheduler.select_scale(scheduler.selected_scale());
}

fn report_arm_failure(e: &SchedulerError) {
    error!(event = "watch.timer.arm_failed", error = %e);
    messages::error(format!("{} (display is stale, retrying)", e));
}

fn watch_config(path: &Path, tx: mpsc::UnboundedSender<()>) -> AppResult<RecommendedWatcher> {
    let file_name = path.file_name().map(|n| n.to_os_string());

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res
            && (event.kind.is_modify() || event.kind.is_create())
            && event
                .paths
                .iter()
                .any(|p| p.file_name() == file_name.as_deref())
        {
            let _ = tx.send(());
        }
    })?;

    // Editors often replace the file, so watch the directory.
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
