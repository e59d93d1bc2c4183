use crate::models::{Configuration, ProgressResult, TimeScale};

/// Whole-year ratio: only the birth year is known, so month and day of
/// birth are ignored and the value jumps on 1 January.
pub fn life_progress(current_year: i32, config: &Configuration) -> ProgressResult {
    let expectancy = config.life_expectancy_years;
    if !expectancy.is_finite() || expectancy <= 0.0 {
        return ProgressResult::zero(TimeScale::Life);
    }

    let age = i64::from(current_year) - i64::from(config.birth_year);
    if age < 0 {
        return ProgressResult::zero(TimeScale::Life);
    }

    let age = age as f64;
    let years_left = (expectancy - age).floor().max(0.0) as i64;
    ProgressResult::new(TimeScale::Life, age / expectancy, Some(years_left))
}
