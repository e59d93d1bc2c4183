pub mod calculator;
pub mod runtime;
pub mod scheduler;
