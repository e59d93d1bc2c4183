//! ProgressCalculator: pure mapping of (scale, instant, configuration) to a
//! progress reading. Never fails: degenerate inputs produce a zero fraction.

pub mod calendar;
pub mod life;
pub mod periods;

use crate::models::{Configuration, ProgressResult, TimeScale};
use chrono::{DateTime, Datelike, TimeZone};

pub fn compute<Tz: TimeZone>(
    scale: TimeScale,
    now: &DateTime<Tz>,
    config: &Configuration,
) -> ProgressResult {
    match scale {
        TimeScale::Hour => periods::hour_progress(now),
        TimeScale::Day => periods::day_progress(now),
        TimeScale::Month => periods::month_progress(now),
        TimeScale::Year => periods::year_progress(now),
        TimeScale::Life => life::life_progress(now.year(), config),
    }
}

/// Every scale at the same instant, in menu order.
pub fn compute_all<Tz: TimeZone>(now: &DateTime<Tz>, config: &Configuration) -> Vec<ProgressResult> {
    TimeScale::ALL
        .iter()
        .map(|scale| compute(*scale, now, config))
        .collect()
}
