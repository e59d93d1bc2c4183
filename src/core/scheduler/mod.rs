//! RefreshScheduler: owns the selected scale and the pending wake-up, and
//! republishes a fresh reading on selection changes and timer ticks.
//!
//! The scheduler is driven synchronously by its host. Ticks are
//! self-rescheduling: each one arms exactly one next wake-up at
//! `now + interval`, so a late tick costs a single recompute and an
//! interval edit takes effect without a cancel/restart pair.

mod ports;

pub use ports::{
    Clock, ConfigProvider, ProgressSink, SchedulerError, SystemClock, Timer, TimerHandle,
};

use crate::core::calculator;
use crate::models::configuration::sanitize_interval;
use crate::models::{Configuration, ProgressResult, TimeScale};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Constructed, no wake-up armed.
    Idle,
    /// A wake-up is pending.
    Armed,
    /// Terminal.
    Stopped,
}

pub struct RefreshScheduler<P, C, T, S>
where
    P: ConfigProvider,
    C: Clock,
    T: Timer,
    S: ProgressSink,
{
    provider: P,
    clock: C,
    timer: T,
    sink: S,
    selected_scale: TimeScale,
    last_computed: Option<ProgressResult>,
    pending: Option<TimerHandle>,
    state: SchedulerState,
}

impl<P, C, T, S> RefreshScheduler<P, C, T, S>
where
    P: ConfigProvider,
    C: Clock,
    T: Timer,
    S: ProgressSink,
{
    pub fn new(provider: P, clock: C, timer: T, sink: S, initial_scale: TimeScale) -> Self {
        Self {
            provider,
            clock,
            timer,
            sink,
            selected_scale: initial_scale,
            last_computed: None,
            pending: None,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn selected_scale(&self) -> TimeScale {
        self.selected_scale
    }

    pub fn last_computed(&self) -> Option<&ProgressResult> {
        self.last_computed.as_ref()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Idle → Armed: publish once, then arm the first wake-up.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Idle {
            return Ok(());
        }

        let config = self.provider.configuration();
        self.recompute_and_publish(&config);
        self.arm(config.refresh_interval())
    }

    /// Switch scale and publish immediately.
    pub fn select_scale(&mut self, scale: TimeScale) {
        if self.state == SchedulerState::Stopped {
            return;
        }

        if scale != self.selected_scale {
            info!(
                event = "scheduler.scale.selected",
                from = self.selected_scale.code(),
                to = scale.code(),
            );
        }
        self.selected_scale = scale;
        let config = self.provider.configuration();
        self.recompute_and_publish(&config);
    }

    /// Move the pending wake-up to the new cadence. Publishes nothing.
    pub fn on_interval_changed(&mut self, new_interval_seconds: f64) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Armed {
            return Ok(());
        }

        let interval = sanitize_interval(new_interval_seconds);
        debug!(
            event = "scheduler.interval.changed",
            interval_secs = interval.as_secs_f64(),
        );

        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
        self.arm(interval)
    }

    /// Timer callback: recompute, publish, re-arm at the fresh interval.
    pub fn tick(&mut self) -> Result<(), SchedulerError> {
        if self.state == SchedulerState::Stopped {
            debug!(event = "scheduler.tick.ignored", reason = "stopped");
            return Ok(());
        }

        // The wake-up that brought us here has fired.
        self.pending = None;

        // One read: the published reading and the next cadence agree.
        let config = self.provider.configuration();
        self.recompute_and_publish(&config);
        self.arm(config.refresh_interval())
    }

    /// Cancel the pending wake-up and go inert for good.
    pub fn shutdown(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }

        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
        self.state = SchedulerState::Stopped;
        info!(event = "scheduler.stopped");
    }

    fn recompute_and_publish(&mut self, config: &Configuration) {
        let now = self.clock.now();
        let result = calculator::compute(self.selected_scale, &now, config);

        debug!(
            event = "scheduler.progress.published",
            scale = result.scale.code(),
            fraction = result.fraction,
            percentage = result.percentage,
        );

        self.sink.on_progress_updated(&result);
        self.last_computed = Some(result);
    }

    fn arm(&mut self, delay: Duration) -> Result<(), SchedulerError> {
        match self.timer.arm(delay) {
            Ok(handle) => {
                self.pending = Some(handle);
                self.state = SchedulerState::Armed;
                Ok(())
            }
            Err(e) => {
                // No wake-up pending: the display would freeze. Drop back to
                // Idle so the host can surface the fault and start() again.
                warn!(event = "scheduler.arm.failed", error = %e);
                self.pending = None;
                self.state = SchedulerState::Idle;
                Err(e)
            }
        }
    }
}
