//! Rendering context — serializable payload exposed to every template.
//!
//! Resolved once at process startup and passed by reference for the rest of
//! the run; per-file work never mutates it.

use std::process::Command;

use serde::Serialize;

use templater_core::ConfigValues;

use crate::error::RenderError;

/// Host/user overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
    pub host: Option<String>,
    pub user: Option<String>,
}

/// Data made available to template evaluation.
///
/// Templates reference `host`, `user`, and `user_host` at the top level and
/// config entries under `values.<key>`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderingContext {
    pub host: String,
    pub user: String,
    pub user_host: String,
    pub values: ConfigValues,
}

impl RenderingContext {
    /// Resolve the context from overrides, the process environment, and
    /// loaded config values.
    ///
    /// Resolution order: override flag, then environment variable, then the
    /// system utility (`hostname` / `id -un`). An unresolvable host or user
    /// is a fatal error.
    pub fn resolve(
        overrides: &ContextOverrides,
        values: ConfigValues,
    ) -> Result<Self, RenderError> {
        let host = match &overrides.host {
            Some(h) if !h.is_empty() => h.clone(),
            _ => detect_hostname().ok_or(RenderError::HostUnresolved)?,
        };
        let user = match &overrides.user {
            Some(u) if !u.is_empty() => u.clone(),
            _ => detect_username().ok_or(RenderError::UserUnresolved)?,
        };
        let user_host = format!("{user}@{host}");
        Ok(RenderingContext { host, user, user_host, values })
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

// ---------------------------------------------------------------------------
// Host / user detection
// ---------------------------------------------------------------------------

fn detect_hostname() -> Option<String> {
    if let Ok(name) = std::env::var("HOSTNAME") {
        if !name.is_empty() {
            return Some(name);
        }
    }
    command_stdout("hostname", &[])
}

fn detect_username() -> Option<String> {
    if let Ok(name) = std::env::var("USER") {
        if !name.is_empty() {
            return Some(name);
        }
    }
    command_stdout("id", &["-un"])
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
