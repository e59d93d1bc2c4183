/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Bar color by elapsed share, battery style:
/// <50% → green
/// <80% → yellow
/// otherwise → red
pub fn color_for_percentage(percentage: u8) -> &'static str {
    if percentage < 50 {
        GREEN
    } else if percentage < 80 {
        YELLOW
    } else {
        RED
    }
}

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
