use super::calendar::{self, Period};
use crate::models::{ProgressResult, TimeScale};
use chrono::{DateTime, Datelike, TimeZone, Utc};

/// elapsed / total in seconds, 0.0 when the period is empty or inverted.
fn ratio(period: &Period, now: DateTime<Utc>) -> Option<f64> {
    let total = period.length().num_milliseconds();
    if total <= 0 {
        return None;
    }
    let elapsed = (now - period.start).num_milliseconds();
    let fraction = elapsed as f64 / total as f64;
    fraction.is_finite().then_some(fraction)
}

pub fn hour_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> ProgressResult {
    let utc = now.with_timezone(&Utc);
    calendar::hour_of(now)
        .and_then(|p| {
            let fraction = ratio(&p, utc)?;
            Some(ProgressResult::new(
                TimeScale::Hour,
                fraction,
                Some((p.end - utc).num_minutes()),
            ))
        })
        .unwrap_or_else(|| ProgressResult::zero(TimeScale::Hour))
}

pub fn day_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> ProgressResult {
    let utc = now.with_timezone(&Utc);
    calendar::day_of(now)
        .and_then(|p| {
            let fraction = ratio(&p, utc)?;
            Some(ProgressResult::new(
                TimeScale::Day,
                fraction,
                Some((p.end - utc).num_hours()),
            ))
        })
        .unwrap_or_else(|| ProgressResult::zero(TimeScale::Day))
}

pub fn month_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> ProgressResult {
    let utc = now.with_timezone(&Utc);
    let today = now.date_naive();
    calendar::month_of(now)
        .and_then(|p| {
            let fraction = ratio(&p, utc)?;
            let days_left = calendar::days_in_month(today)? - today.day();
            Some(ProgressResult::new(
                TimeScale::Month,
                fraction,
                Some(i64::from(days_left)),
            ))
        })
        .unwrap_or_else(|| ProgressResult::zero(TimeScale::Month))
}

pub fn year_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> ProgressResult {
    let utc = now.with_timezone(&Utc);
    let today = now.date_naive();
    calendar::year_of(now)
        .and_then(|p| {
            let fraction = ratio(&p, utc)?;
            let days_left = calendar::days_in_year(today.year())? - today.ordinal();
            Some(ProgressResult::new(
                TimeScale::Year,
                fraction,
                Some(i64::from(days_left)),
            ))
        })
        .unwrap_or_else(|| ProgressResult::zero(TimeScale::Year))
}
