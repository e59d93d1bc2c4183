//! Unified application error type.
//! All modules (config, core, cli, ui) return AppError to keep the error
//! handling consistent and easy to manage. The scheduler has its own narrow
//! error type that converts into AppError at the host boundary.

use crate::core::scheduler::SchedulerError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time scale: {0}")]
    InvalidScale(String),

    #[error("Invalid refresh interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file already exists: {0}")]
    ConfigExists(String),

    // ---------------------------
    // Runtime errors
    // ---------------------------
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}

pub type AppResult<T> = Result<T, AppError>;
