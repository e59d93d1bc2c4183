//! Values the calculator and the scheduler read on every recompute.

use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BIRTH_YEAR: i32 = 1998;
pub const DEFAULT_LIFE_EXPECTANCY: f64 = 80.0;
pub const DEFAULT_REFRESH_INTERVAL: f64 = 60.0;

/// Shortest cadence the scheduler will arm.
pub const MIN_REFRESH_INTERVAL: f64 = 1.0;
/// Longest cadence the scheduler will arm (one day).
pub const MAX_REFRESH_INTERVAL: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Configuration {
    pub birth_year: i32,
    pub life_expectancy_years: f64,
    pub refresh_interval_seconds: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            birth_year: DEFAULT_BIRTH_YEAR,
            life_expectancy_years: DEFAULT_LIFE_EXPECTANCY,
            refresh_interval_seconds: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl Configuration {
    /// Refresh cadence as a Duration, with degenerate values replaced.
    pub fn refresh_interval(&self) -> Duration {
        sanitize_interval(self.refresh_interval_seconds)
    }
}

/// Non-finite or non-positive → default; otherwise clamped to [1 s, 1 day].
pub fn sanitize_interval(seconds: f64) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::from_secs_f64(DEFAULT_REFRESH_INTERVAL);
    }
    Duration::from_secs_f64(seconds.clamp(MIN_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_preference_defaults() {
        let cfg = Configuration::default();
        assert_eq!(cfg.birth_year, 1998);
        assert_eq!(cfg.life_expectancy_years, 80.0);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_degenerate_intervals_fall_back() {
        assert_eq!(sanitize_interval(0.0), Duration::from_secs(60));
        assert_eq!(sanitize_interval(-5.0), Duration::from_secs(60));
        assert_eq!(sanitize_interval(f64::NAN), Duration::from_secs(60));
        assert_eq!(sanitize_interval(f64::INFINITY), Duration::from_secs(60));
        assert_eq!(sanitize_interval(0.2), Duration::from_secs(1));
        assert_eq!(sanitize_interval(30.0), Duration::from_secs(30));
        assert_eq!(sanitize_interval(1e300), Duration::from_secs(86_400));
    }
}
