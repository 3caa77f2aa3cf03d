//! Output gate: perform or suppress a pending write.
//!
//! ## Write protocol
//!
//! 1. Dry-run short-circuits before any filesystem mutation.
//! 2. Interactive mode prompts before replacing an existing file; a declined
//!    prompt is a distinct outcome, not an error.
//! 3. Any existing target is removed first — a read-only output left by a
//!    previous `--read-only` run must still be replaceable.
//! 4. Parent directories are created as needed, then the file is written.
//! 5. `--read-only` marks the result `0444`; chmod failure is logged only.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{io_err, ScanError};

/// Write-time behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct WritePolicy {
    /// Report only; no filesystem mutation.
    pub dry_run: bool,
    /// Prompt before replacing an existing file. Callers reading template
    /// content from stdin must leave this off — the prompt stream is taken.
    pub interactive: bool,
    /// Mark written files read-only (`0444`).
    pub read_only: bool,
}

/// Outcome of an individual gated write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was written.
    Written { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
    /// The user declined the replacement prompt. Silent success, not an error.
    SkippedByUser { path: PathBuf },
}

/// Decides whether each pending write happens, and performs it.
///
/// `prompt_input` is injected so tests can simulate interactive answers; the
/// CLI passes a locked stdin.
pub struct OutputGate<R> {
    policy: WritePolicy,
    prompt_input: R,
}

impl<R: BufRead> OutputGate<R> {
    pub fn new(policy: WritePolicy, prompt_input: R) -> Self {
        OutputGate { policy, prompt_input }
    }

    /// Write `bytes` to `path`, subject to the policy.
    pub fn write(&mut self, path: &Path, bytes: &[u8]) -> Result<WriteOutcome, ScanError> {
        if self.policy.dry_run {
            return Ok(WriteOutcome::WouldWrite {
                path: path.to_path_buf(),
            });
        }

        if self.policy.interactive && path.exists() && !self.confirm_replace(path) {
            return Ok(WriteOutcome::SkippedByUser {
                path: path.to_path_buf(),
            });
        }

        create_output_file(path, bytes)?;

        if self.policy.read_only {
            if let Err(err) = mark_read_only(path) {
                log::warn!("failed to mark {} read-only: {err}", path.display());
            }
        }

        Ok(WriteOutcome::Written {
            path: path.to_path_buf(),
        })
    }

    /// `Replace {path}? [y|n] ` — only `y`/`yes` (case-insensitive) proceeds.
    fn confirm_replace(&mut self, path: &Path) -> bool {
        print!("Replace {}? [y|n] ", path.display());
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        let _ = self.prompt_input.read_line(&mut line);
        let answer = line.trim();
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }
}

fn create_output_file(path: &Path, bytes: &[u8]) -> Result<(), ScanError> {
    // Remove first: fs::write cannot truncate a read-only file.
    let _ = std::fs::remove_file(path);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| io_err(path, e))
}

#[cfg(unix)]
fn mark_read_only(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o444))
}

#[cfg(not(unix))]
fn mark_read_only(path: &Path) -> std::io::Result<()> {
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_readonly(true);
    std::fs::set_permissions(path, perms)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
