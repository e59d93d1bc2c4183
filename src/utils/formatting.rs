//! Formatting utilities used for terminal and status-line output.

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// `13 days left`, `1 day left`, `0 minutes left`.
pub fn remaining_phrase(value: i64, unit: &str) -> String {
    let unit = if value == 1 {
        unit.strip_suffix('s').unwrap_or(unit)
    } else {
        unit
    };
    format!("{} {} left", value, unit)
}
