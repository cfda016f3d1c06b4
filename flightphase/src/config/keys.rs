//! Typed access to individual config settings.
//!
//! Every setting has a [`ConfigKey`] named `section.key`, matching its place
//! in the INI file. The CLI `config get/set` commands and the INI reader
//! both go through [`ConfigKey::get`] and [`ConfigKey::set`], so validation
//! lives in one place.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::{ConfigError, ConfigFile};
use crate::logging::{is_valid_level, LEVELS};

/// A single configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ClassifierMinTaxiSpeed,
    ClassifierMinTakeoffSpeed,
    ClassifierMinClimbVerticalSpeed,
    ClassifierCruiseTolerance,
    ClassifierLimitationAltitude,
    ServicePollInterval,
    ServiceEventCapacity,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub const ALL: [ConfigKey; 9] = [
        ConfigKey::ClassifierMinTaxiSpeed,
        ConfigKey::ClassifierMinTakeoffSpeed,
        ConfigKey::ClassifierMinClimbVerticalSpeed,
        ConfigKey::ClassifierCruiseTolerance,
        ConfigKey::ClassifierLimitationAltitude,
        ConfigKey::ServicePollInterval,
        ConfigKey::ServiceEventCapacity,
        ConfigKey::LoggingLevel,
        ConfigKey::LoggingFile,
    ];

    /// INI section.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ClassifierMinTaxiSpeed
            | ConfigKey::ClassifierMinTakeoffSpeed
            | ConfigKey::ClassifierMinClimbVerticalSpeed
            | ConfigKey::ClassifierCruiseTolerance
            | ConfigKey::ClassifierLimitationAltitude => "classifier",
            ConfigKey::ServicePollInterval | ConfigKey::ServiceEventCapacity => "service",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key within the section.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigKey::ClassifierMinTaxiSpeed => "min_taxi_speed_kt",
            ConfigKey::ClassifierMinTakeoffSpeed => "min_takeoff_speed_kt",
            ConfigKey::ClassifierMinClimbVerticalSpeed => "min_climb_vertical_speed_fpm",
            ConfigKey::ClassifierCruiseTolerance => "cruise_tolerance_ft",
            ConfigKey::ClassifierLimitationAltitude => "limitation_altitude_ft",
            ConfigKey::ServicePollInterval => "poll_interval_ms",
            ConfigKey::ServiceEventCapacity => "event_capacity",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// `section.key`.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key())
    }

    /// Short description for `config list`.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigKey::ClassifierMinTaxiSpeed => "Ground speed below which pushback is detected (kt)",
            ConfigKey::ClassifierMinTakeoffSpeed => "Ground speed for a takeoff roll (kt)",
            ConfigKey::ClassifierMinClimbVerticalSpeed => {
                "Climb threshold; its negation is the descent threshold (ft/min)"
            }
            ConfigKey::ClassifierCruiseTolerance => "Half-width of the cruise altitude band (ft)",
            ConfigKey::ClassifierLimitationAltitude => "Approach and landing ceiling (ft)",
            ConfigKey::ServicePollInterval => "Time between telemetry polls (ms)",
            ConfigKey::ServiceEventCapacity => "Phase change broadcast buffer size",
            ConfigKey::LoggingLevel => "Default log level",
            ConfigKey::LoggingFile => "Optional log file path (empty for none)",
        }
    }

    /// Current value as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        let c = &config.classifier;
        match self {
            ConfigKey::ClassifierMinTaxiSpeed => c.min_taxi_speed_kt.to_string(),
            ConfigKey::ClassifierMinTakeoffSpeed => c.min_takeoff_speed_kt.to_string(),
            ConfigKey::ClassifierMinClimbVerticalSpeed => c.min_climb_vertical_speed_fpm.to_string(),
            ConfigKey::ClassifierCruiseTolerance => c.cruise_tolerance_ft.to_string(),
            ConfigKey::ClassifierLimitationAltitude => c.limitation_altitude_ft.to_string(),
            ConfigKey::ServicePollInterval => config.service.poll_interval.as_millis().to_string(),
            ConfigKey::ServiceEventCapacity => config.service.event_capacity.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::ClassifierMinTaxiSpeed => {
                config.classifier.min_taxi_speed_kt = self.parse_positive(value)?
            }
            ConfigKey::ClassifierMinTakeoffSpeed => {
                config.classifier.min_takeoff_speed_kt = self.parse_positive(value)?
            }
            ConfigKey::ClassifierMinClimbVerticalSpeed => {
                config.classifier.min_climb_vertical_speed_fpm = self.parse_positive(value)?
            }
            ConfigKey::ClassifierCruiseTolerance => {
                config.classifier.cruise_tolerance_ft = self.parse_positive(value)?
            }
            ConfigKey::ClassifierLimitationAltitude => {
                config.classifier.limitation_altitude_ft = self.parse_positive(value)?
            }
            ConfigKey::ServicePollInterval => {
                let ms: u64 = self.parse_nonzero(value)?;
                config.service.poll_interval = Duration::from_millis(ms);
            }
            ConfigKey::ServiceEventCapacity => {
                config.service.event_capacity = self.parse_nonzero(value)?;
            }
            ConfigKey::LoggingLevel => {
                if !is_valid_level(value) {
                    return Err(self.invalid(value, format!("expected one of {}", LEVELS.join(", "))));
                }
                config.logging.level = value.to_ascii_lowercase();
            }
            ConfigKey::LoggingFile => {
                config.logging.file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn parse_positive(&self, value: &str) -> Result<f32, ConfigError> {
        let parsed: f32 = value
            .parse()
            .map_err(|_| self.invalid(value, "expected a number"))?;
        if !parsed.is_finite() || parsed <= 0.0 {
            return Err(self.invalid(value, "must be greater than zero"));
        }
        Ok(parsed)
    }

    fn parse_nonzero<T>(&self, value: &str) -> Result<T, ConfigError>
    where
        T: FromStr + Default + PartialEq,
    {
        let parsed: T = value
            .parse()
            .map_err(|_| self.invalid(value, "expected a whole number"))?;
        if parsed == T::default() {
            return Err(self.invalid(value, "must be greater than zero"));
        }
        Ok(parsed)
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key())
    }
}
