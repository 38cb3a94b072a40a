//! Level loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Level configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse level: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid level: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
