//! Error types for templater-scan.

use std::path::PathBuf;

use thiserror::Error;

use templater_render::RenderError;

/// All errors that can arise from scanning and writing.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template path that should have been absolute was not.
    #[error("{path} is not absolute")]
    RelativePath { path: PathBuf },

    /// A scanned file's directory is outside the configured original prefix.
    #[error("{dir} is not under {prefix}")]
    PrefixMismatch { dir: PathBuf, prefix: PathBuf },

    /// Directory walk failure (unreadable root or subtree).
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Convenience constructor for [`ScanError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScanError {
    ScanError::Io {
        path: path.into(),
        source,
    }
}
