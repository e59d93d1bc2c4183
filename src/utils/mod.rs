pub mod colors;
pub mod formatting;
pub mod time;

pub use formatting::remaining_phrase;
pub use time::{format_interval, parse_interval};
