use super::time_scale::TimeScale;
use serde::Serialize;

/// One computed reading. Recomputed on every tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressResult {
    pub scale: TimeScale,
    /// Raw ratio. Life may exceed 1.0.
    pub fraction: f64,
    /// Truncated percentage of the clamped fraction (0..=100).
    pub percentage: u8,
    pub remaining_units_hint: Option<i64>,
}

impl ProgressResult {
    pub fn new(scale: TimeScale, fraction: f64, remaining_units_hint: Option<i64>) -> Self {
        Self {
            scale,
            fraction,
            percentage: percentage_of(fraction),
            remaining_units_hint,
        }
    }

    /// Safe default returned whenever a computation is degenerate.
    pub fn zero(scale: TimeScale) -> Self {
        Self::new(scale, 0.0, None)
    }

    /// Fraction clamped to [0, 1] for drawing.
    pub fn display_fraction(&self) -> f64 {
        clamp_unit(self.fraction)
    }
}

fn clamp_unit(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

pub fn percentage_of(fraction: f64) -> u8 {
    (clamp_unit(fraction) * 100.0).trunc() as u8
}
