//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors loading, saving or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no user configuration directory.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    /// Failed to read or write the config file.
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid INI.
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A key is not recognized.
    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    /// A value failed validation.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
