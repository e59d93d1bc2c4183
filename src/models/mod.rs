pub mod configuration;
pub mod progress;
pub mod time_scale;

pub use configuration::Configuration;
pub use progress::ProgressResult;
pub use time_scale::TimeScale;
