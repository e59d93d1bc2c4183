#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc,
};
use progress_battery::core::scheduler::{
    Clock, ConfigProvider, ProgressSink, SchedulerError, Timer, TimerHandle,
};
use progress_battery::models::{Configuration, ProgressResult};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

pub fn pb() -> Command {
    cargo_bin_cmd!("progress-battery")
}

/// Fresh temp dir plus the config path inside it (file not created).
pub fn temp_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("progress-battery.conf");
    (dir, path)
}

// ---------------------------
// Scheduler doubles
// ---------------------------

/// Timer that only records what the scheduler asked for. Tests drive
/// `tick()` themselves.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next: u64,
    pub armed: Vec<(TimerHandle, Duration)>,
    pub cancelled: Vec<TimerHandle>,
    pub fail_next: bool,
}

impl ManualTimer {
    pub fn last_delay(&self) -> Option<Duration> {
        self.armed.last().map(|(_, d)| *d)
    }
}

impl Timer for ManualTimer {
    fn arm(&mut self, delay: Duration) -> Result<TimerHandle, SchedulerError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(SchedulerError::ArmFailed("timer unavailable".into()));
        }
        self.next += 1;
        let handle = TimerHandle(self.next);
        self.armed.push((handle, delay));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
    }
}

/// Shared log of everything published.
#[derive(Clone, Default)]
pub struct RecordingSink(pub Rc<RefCell<Vec<ProgressResult>>>);

impl RecordingSink {
    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn last(&self) -> Option<ProgressResult> {
        self.0.borrow().last().copied()
    }
}

impl ProgressSink for RecordingSink {
    fn on_progress_updated(&mut self, result: &ProgressResult) {
        self.0.borrow_mut().push(*result);
    }
}

/// Preference store a test can edit while the scheduler owns a handle.
#[derive(Clone)]
pub struct SharedConfig(pub Rc<Cell<Configuration>>);

impl SharedConfig {
    pub fn new(cfg: Configuration) -> Self {
        Self(Rc::new(Cell::new(cfg)))
    }

    pub fn update(&self, f: impl FnOnce(&mut Configuration)) {
        let mut cfg = self.0.get();
        f(&mut cfg);
        self.0.set(cfg);
    }
}

impl ConfigProvider for SharedConfig {
    fn configuration(&self) -> Configuration {
        self.0.get()
    }
}

/// Clock a test can move forward.
#[derive(Clone)]
pub struct SteppingClock(pub Rc<Cell<DateTime<FixedOffset>>>);

impl SteppingClock {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self(Rc::new(Cell::new(now)))
    }

    pub fn advance(&self, by: Duration) {
        let delta = TimeDelta::from_std(by).expect("delta in range");
        self.0.set(self.0.get() + delta);
    }
}

impl Clock for SteppingClock {
    type Tz = FixedOffset;

    fn now(&self) -> DateTime<FixedOffset> {
        self.0.get()
    }
}

pub fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset")
}

pub fn fixed(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
    utc_offset()
        .with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .expect("valid fixed instant")
}

// ---------------------------
// Synthetic DST zone
// ---------------------------

/// US-Eastern-like zone for 2026 only: UTC-5, and UTC-4 between
/// 2026-03-08 07:00Z (02:00 local jumps to 03:00) and
/// 2026-11-01 06:00Z (02:00 local falls back to 01:00).
#[derive(Debug, Clone, Copy)]
pub struct ToyEastern;

impl ToyEastern {
    pub fn standard() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).expect("UTC-5")
    }

    pub fn daylight() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).expect("UTC-4")
    }

    fn dst_window() -> (NaiveDateTime, NaiveDateTime) {
        let start = NaiveDate::from_ymd_opt(2026, 3, 8)
            .and_then(|d| d.and_hms_opt(7, 0, 0))
            .expect("dst start");
        let end = NaiveDate::from_ymd_opt(2026, 11, 1)
            .and_then(|d| d.and_hms_opt(6, 0, 0))
            .expect("dst end");
        (start, end)
    }

    pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<ToyEastern> {
        ToyEastern
            .with_ymd_and_hms(y, m, d, h, min, s)
            .earliest()
            .expect("local time exists")
    }

    pub fn from_utc(utc: DateTime<Utc>) -> DateTime<ToyEastern> {
        utc.with_timezone(&ToyEastern)
    }
}

impl TimeZone for ToyEastern {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        ToyEastern
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        match local.and_hms_opt(0, 0, 0) {
            Some(midnight) => self.offset_from_local_datetime(&midnight),
            None => LocalResult::None,
        }
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        // A candidate offset is valid when the instant it produces maps back
        // to the same offset. Daylight first: it yields the earlier instant.
        let valid: Vec<FixedOffset> = [Self::daylight(), Self::standard()]
            .into_iter()
            .filter(|offset| {
                let utc = *local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
                self.offset_from_utc_datetime(&utc) == *offset
            })
            .collect();

        match valid.as_slice() {
            [] => LocalResult::None,
            [only] => LocalResult::Single(*only),
            [earliest, latest, ..] => LocalResult::Ambiguous(*earliest, *latest),
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        match utc.and_hms_opt(0, 0, 0) {
            Some(midnight) => self.offset_from_utc_datetime(&midnight),
            None => Self::standard(),
        }
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        let (start, end) = Self::dst_window();
        if *utc >= start && *utc < end {
            Self::daylight()
        } else {
            Self::standard()
        }
    }
}
