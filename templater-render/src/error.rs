//! Error types for templater-render.

use thiserror::Error;

/// All errors that can arise from context resolution and template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (parse or evaluation).
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),

    /// Cannot resolve the machine's host name.
    #[error("cannot determine host name; pass --override-host or set $HOSTNAME")]
    HostUnresolved,

    /// Cannot resolve the current user name.
    #[error("cannot determine user name; pass --override-user or set $USER")]
    UserUnresolved,
}
