//! Effect configuration errors

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading errors
///
/// Effect operations themselves never fail; unknown option values resolve to
/// their documented defaults instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a config file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the effect options
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written back as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
