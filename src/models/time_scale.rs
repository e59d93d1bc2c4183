use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    #[default]
    #[value(alias = "h")]
    Hour,
    #[value(alias = "d")]
    Day,
    #[value(alias = "m")]
    Month,
    #[value(alias = "y")]
    Year,
    #[value(alias = "l")]
    Life,
}

impl TimeScale {
    /// Menu order.
    pub const ALL: [TimeScale; 5] = [
        TimeScale::Hour,
        TimeScale::Day,
        TimeScale::Month,
        TimeScale::Year,
        TimeScale::Life,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TimeScale::Hour => "hour",
            TimeScale::Day => "day",
            TimeScale::Month => "month",
            TimeScale::Year => "year",
            TimeScale::Life => "life",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeScale::Hour => "Hour",
            TimeScale::Day => "Day",
            TimeScale::Month => "Month",
            TimeScale::Year => "Year",
            TimeScale::Life => "Life",
        }
    }

    /// Unit of the remaining hint attached to a result of this scale.
    pub fn hint_unit(&self) -> &'static str {
        match self {
            TimeScale::Hour => "minutes",
            TimeScale::Day => "hours",
            TimeScale::Month | TimeScale::Year => "days",
            TimeScale::Life => "years",
        }
    }

    /// Helper: parse user input (full name or single letter, any case)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "hour" | "h" => Some(TimeScale::Hour),
            "day" | "d" => Some(TimeScale::Day),
            "month" | "m" => Some(TimeScale::Month),
            "year" | "y" => Some(TimeScale::Year),
            "life" | "l" => Some(TimeScale::Life),
            _ => None,
        }
    }

    /// Cycle to the following scale, wrapping from Life back to Hour.
    pub fn next(&self) -> Self {
        match self {
            TimeScale::Hour => TimeScale::Day,
            TimeScale::Day => TimeScale::Month,
            TimeScale::Month => TimeScale::Year,
            TimeScale::Year => TimeScale::Life,
            TimeScale::Life => TimeScale::Hour,
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
