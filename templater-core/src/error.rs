//! Error types for templater-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from config store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config document parsed but is not a string-keyed mapping.
    #[error("invalid config at {path}: {detail}")]
    InvalidShape { path: PathBuf, detail: String },

    /// `dirs::config_dir()` returned `None` — cannot locate the config directory.
    #[error("cannot determine config directory; set $TEMPLATER_CONFIG or $HOME")]
    ConfigDirNotFound,
}
