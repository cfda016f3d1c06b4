//! Configuration file.
//!
//! Settings live in an INI file, by default
//! `<config dir>/flightphase/config.ini`:
//!
//! ```ini
//! [classifier]
//! min_taxi_speed_kt = 10
//! min_takeoff_speed_kt = 40
//! min_climb_vertical_speed_fpm = 500
//! cruise_tolerance_ft = 1000
//! limitation_altitude_ft = 10000
//!
//! [service]
//! poll_interval_ms = 1000
//! event_capacity = 64
//!
//! [logging]
//! level = info
//! file =
//! ```
//!
//! A missing file or missing keys fall back to the defaults. Unknown keys
//! are ignored with a warning.

mod error;
mod keys;

pub use error::ConfigError;
pub use keys::ConfigKey;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;

use crate::classifier::ClassifierThresholds;
use crate::logging::LoggingConfig;
use crate::service::{DEFAULT_EVENT_CAPACITY, DEFAULT_POLL_INTERVAL};

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "flightphase";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default config file location.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// `[service]` settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub poll_interval: Duration,
    pub event_capacity: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// All settings from the config file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub classifier: ClassifierThresholds,
    pub service: ServiceSettings,
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_file_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(parse) => ConfigError::Parse {
                path: path.to_path_buf(),
                message: parse.to_string(),
            },
        })?;

        Self::from_ini(&ini)
    }

    /// Build from parsed INI data.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (section, properties) in ini.iter() {
            let Some(section) = section else { continue };

            for (key, value) in properties.iter() {
                match format!("{}.{}", section, key).parse::<ConfigKey>() {
                    Ok(config_key) => config_key.set(&mut config, value)?,
                    Err(_) => {
                        tracing::warn!(section, key, "Ignoring unknown config key");
                    }
                }
            }
        }

        Ok(config)
    }

    /// Render as INI data.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::ALL {
            ini.with_section(Some(key.section()))
                .set(key.key(), key.get(self));
        }
        ini
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        self.to_ini().write_to_file(path).map_err(io_error)
    }

    /// Write to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }
}
