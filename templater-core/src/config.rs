//! User config file: free-form YAML values exposed to templates.
//!
//! # Storage layout
//!
//! ```text
//! $TEMPLATER_CONFIG            (explicit override, if set)
//! <config_dir>/templater/config   (default — ~/.config/templater/config on Linux)
//! ```
//!
//! # API pattern
//!
//! Every function has two forms:
//! - `fn_at(path: &Path)` — explicit path; used in tests with `TempDir`
//! - `fn()` — derives the path from `$TEMPLATER_CONFIG` / `dirs::config_dir()`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Free-form values a user may reference from templates as `values.<key>`.
pub type ConfigValues = BTreeMap<String, serde_yaml::Value>;

/// Contents written to the config file on first run.
pub const DEFAULT_CONFIG: &str = "HiDpi: true\nInDocker: false\n";

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Resolve the config file path: `$TEMPLATER_CONFIG` if set and non-empty,
/// else `<config_dir>/templater/config`. Pure except for the env/dirs lookup.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Some(explicit) = std::env::var_os("TEMPLATER_CONFIG") {
        if !explicit.is_empty() {
            return Ok(PathBuf::from(explicit));
        }
    }
    let base = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(base.join("templater").join("config"))
}

// ---------------------------------------------------------------------------
// Load (auto-creating)
// ---------------------------------------------------------------------------

/// Load config values from `path`, creating the file with [`DEFAULT_CONFIG`]
/// (and any missing parent directories) if it does not exist.
pub fn load_or_init_at(path: &Path) -> Result<ConfigValues, ConfigError> {
    if !path.exists() {
        scaffold_default(path)?;
    }
    let contents = std::fs::read_to_string(path)?;
    parse_values(path, &contents)
}

/// `load_or_init_at` convenience wrapper using [`config_path`].
pub fn load_or_init() -> Result<ConfigValues, ConfigError> {
    load_or_init_at(&config_path()?)
}

/// Write the default config via a `.tmp` sibling + rename.
fn scaffold_default(path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, DEFAULT_CONFIG)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Strict-shape parsing
// ---------------------------------------------------------------------------

/// Parse a config document. The document must be empty or a YAML mapping with
/// string keys; any other shape is a fatal [`ConfigError::InvalidShape`].
fn parse_values(path: &Path, contents: &str) -> Result<ConfigValues, ConfigError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(contents).map_err(|e| {
        ConfigError::Parse { path: path.to_path_buf(), source: e }
    })?;

    let mapping = match doc {
        serde_yaml::Value::Null => return Ok(ConfigValues::new()),
        serde_yaml::Value::Mapping(m) => m,
        other => {
            return Err(ConfigError::InvalidShape {
                path: path.to_path_buf(),
                detail: format!("expected a key/value mapping, found {}", shape_name(&other)),
            })
        }
    };

    let mut values = ConfigValues::new();
    for (key, value) in mapping {
        match key {
            serde_yaml::Value::String(k) => {
                values.insert(k, value);
            }
            other => {
                return Err(ConfigError::InvalidShape {
                    path: path.to_path_buf(),
                    detail: format!("non-string key: {:?}", other),
                })
            }
        }
    }
    Ok(values)
}

fn shape_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
