//! Collaborators injected into the scheduler.

use crate::models::{Configuration, ProgressResult};
use chrono::{DateTime, Local, TimeZone};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Failed to arm refresh timer: {0}")]
    ArmFailed(String),
}

/// Opaque identity of one armed wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// A one-shot, cancellable wake-up source. The host calls
/// `RefreshScheduler::tick` when the armed delay has elapsed.
pub trait Timer {
    fn arm(&mut self, delay: Duration) -> Result<TimerHandle, SchedulerError>;
    fn cancel(&mut self, handle: TimerHandle);
}

pub trait Clock {
    type Tz: TimeZone;
    fn now(&self) -> DateTime<Self::Tz>;
}

/// Host wall clock in the host's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Read on every recompute; implementations must not cache.
pub trait ConfigProvider {
    fn configuration(&self) -> Configuration;
}

impl ConfigProvider for Configuration {
    fn configuration(&self) -> Configuration {
        *self
    }
}

impl<P: ConfigProvider> ConfigProvider for Rc<RefCell<P>> {
    fn configuration(&self) -> Configuration {
        self.borrow().configuration()
    }
}

/// Display callback.
pub trait ProgressSink {
    fn on_progress_updated(&mut self, result: &ProgressResult);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressResult),
{
    fn on_progress_updated(&mut self, result: &ProgressResult) {
        self(result)
    }
}
