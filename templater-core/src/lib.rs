//! Templater core library — config store and errors.
//!
//! Public API surface:
//! - [`config`] — locate / auto-create / strict-parse the user config file
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;

pub use config::{ConfigValues, DEFAULT_CONFIG};
pub use error::ConfigError;
