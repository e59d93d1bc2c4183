//! Calendar boundary resolution.
//!
//! Every period length is derived by subtracting two resolved boundary
//! instants, never from fixed constants, so 23h/25h DST days and leap
//! years come out right by construction.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};

/// Step used to walk forward out of a DST gap.
const GAP_PROBE_STEP_MINUTES: i64 = 15;
/// Give up after one day of probing.
const GAP_PROBE_LIMIT: i64 = 24 * 60 / GAP_PROBE_STEP_MINUTES;

/// A half-open period `[start, end)` expressed in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn length(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Map a local wall-clock time to an instant.
/// - ambiguous (fall back) → earliest mapping
/// - inside a gap (spring forward) → first valid instant after it
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    for step in 0..=GAP_PROBE_LIMIT {
        let probe = local.checked_add_signed(TimeDelta::minutes(step * GAP_PROBE_STEP_MINUTES))?;
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return Some(dt.with_timezone(&Utc));
        }
    }
    None
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    resolve_local(tz, date.and_hms_opt(0, 0, 0)?)
}

/// Current clock hour. Start is found by stepping back over the minutes and
/// seconds of `now` itself, which keeps the second pass of a repeated
/// (fall back) hour anchored to the right instant.
pub fn hour_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<Period> {
    let local = now.naive_local();
    let into_hour = TimeDelta::try_seconds(i64::from(local.minute() * 60 + local.second()))?
        + TimeDelta::nanoseconds(i64::from(local.nanosecond()));
    let start = now.with_timezone(&Utc).checked_sub_signed(into_hour)?;
    let end = start.checked_add_signed(TimeDelta::hours(1))?;
    Some(Period { start, end })
}

pub fn day_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<Period> {
    let tz = now.timezone();
    let today = now.date_naive();
    let start = local_midnight(&tz, today)?;
    let end = local_midnight(&tz, today.succ_opt()?)?;
    Some(Period { start, end })
}

pub fn month_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<Period> {
    let tz = now.timezone();
    let first = first_of_month(now.year(), now.month())?;
    let next = first_of_next_month(first)?;
    Some(Period {
        start: local_midnight(&tz, first)?,
        end: local_midnight(&tz, next)?,
    })
}

pub fn year_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<Period> {
    let tz = now.timezone();
    let first = NaiveDate::from_ymd_opt(now.year(), 1, 1)?;
    let next = NaiveDate::from_ymd_opt(now.year().checked_add(1)?, 1, 1)?;
    Some(Period {
        start: local_midnight(&tz, first)?,
        end: local_midnight(&tz, next)?,
    })
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn first_of_next_month(first: NaiveDate) -> Option<NaiveDate> {
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year().checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
}

/// Number of calendar days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> Option<u32> {
    let first = first_of_month(date.year(), date.month())?;
    let next = first_of_next_month(first)?;
    u32::try_from((next - first).num_days()).ok()
}

/// Number of calendar days in `year`.
pub fn days_in_year(year: i32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let next = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    u32::try_from((next - first).num_days()).ok()
}
