use crate::core::scheduler::ConfigProvider;
use crate::errors::{AppError, AppResult};
use crate::models::configuration::{
    Configuration, DEFAULT_BIRTH_YEAR, DEFAULT_LIFE_EXPECTANCY, DEFAULT_REFRESH_INTERVAL,
};
use crate::models::TimeScale;
use crate::utils::time::parse_interval;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "progress-battery.conf";

/// Every key the preference store understands, in file order.
pub const KEYS: [&str; 5] = [
    "birth_year",
    "life_expectancy",
    "update_interval",
    "bar_width",
    "default_scale",
];

const MAX_LIFE_EXPECTANCY: f64 = 150.0;
const MAX_BAR_WIDTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_birth_year", alias = "birthYear")]
    pub birth_year: i32,
    #[serde(default = "default_life_expectancy", alias = "lifeExpectancy")]
    pub life_expectancy: f64,
    /// Seconds between refreshes.
    #[serde(default = "default_update_interval", alias = "updateInterval")]
    pub update_interval: f64,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    #[serde(default)]
    pub default_scale: TimeScale,
}

fn default_birth_year() -> i32 {
    DEFAULT_BIRTH_YEAR
}
fn default_life_expectancy() -> f64 {
    DEFAULT_LIFE_EXPECTANCY
}
fn default_update_interval() -> f64 {
    DEFAULT_REFRESH_INTERVAL
}
fn default_bar_width() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            birth_year: default_birth_year(),
            life_expectancy: default_life_expectancy(),
            update_interval: default_update_interval(),
            bar_width: default_bar_width(),
            default_scale: TimeScale::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(|| env::var("HOME").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("progress-battery")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(event = "config.load.defaults", path = %path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Write a default configuration file. Refuses to clobber an existing one.
    pub fn init_at(path: &Path, force: bool) -> AppResult<Self> {
        if path.exists() && !force {
            return Err(AppError::ConfigExists(path.display().to_string()));
        }
        let cfg = Self::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }

    /// Calculator/scheduler view of the preferences.
    pub fn configuration(&self) -> Configuration {
        Configuration {
            birth_year: self.birth_year,
            life_expectancy_years: self.life_expectancy,
            refresh_interval_seconds: self.update_interval,
        }
    }

    // ---------------------------
    // Key/value access
    // ---------------------------

    pub fn get(&self, key: &str) -> AppResult<String> {
        let value = match key {
            "birth_year" => self.birth_year.to_string(),
            "life_expectancy" => self.life_expectancy.to_string(),
            "update_interval" => self.update_interval.to_string(),
            "bar_width" => self.bar_width.to_string(),
            "default_scale" => self.default_scale.code().to_string(),
            other => return Err(AppError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let invalid = || AppError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();

        match key {
            "birth_year" => {
                self.birth_year = value.parse().map_err(|_| invalid())?;
            }
            "life_expectancy" => {
                let years: f64 = value.parse().map_err(|_| invalid())?;
                if !years.is_finite() || years <= 0.0 || years > MAX_LIFE_EXPECTANCY {
                    return Err(invalid());
                }
                self.life_expectancy = years;
            }
            "update_interval" => {
                self.update_interval = parse_interval(value)?.as_secs_f64();
            }
            "bar_width" => {
                let width: usize = value.parse().map_err(|_| invalid())?;
                if width == 0 || width > MAX_BAR_WIDTH {
                    return Err(invalid());
                }
                self.bar_width = width;
            }
            "default_scale" => {
                self.default_scale =
                    TimeScale::from_code(value).ok_or_else(|| AppError::InvalidScale(value.into()))?;
            }
            other => return Err(AppError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Keys absent from the file on disk (their defaults are in effect).
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Ok(KEYS.to_vec());
        }

        let content = fs::read_to_string(path)?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let Some(map) = yaml.as_mapping() else {
            return Ok(KEYS.to_vec());
        };

        let present = |key: &str| {
            let alias = match key {
                "birth_year" => Some("birthYear"),
                "life_expectancy" => Some("lifeExpectancy"),
                "update_interval" => Some("updateInterval"),
                _ => None,
            };
            map.contains_key(key) || alias.is_some_and(|a| map.contains_key(a))
        };

        Ok(KEYS.iter().copied().filter(|k| !present(k)).collect())
    }
}

/// Preference store backed by the YAML file. Re-read on every call so edits
/// made between ticks are picked up without a notification.
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file contents, or defaults when the file cannot be used.
    pub fn load(&self) -> Config {
        match Config::load_from(&self.path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(
                    event = "config.load.failed",
                    path = %self.path.display(),
                    error = %e,
                );
                Config::default()
            }
        }
    }
}

impl ConfigProvider for FileConfigProvider {
    fn configuration(&self) -> Configuration {
        self.load().configuration()
    }
}
