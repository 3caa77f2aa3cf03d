//! Per-file status lines, human-readable or porcelain.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::classify::WriteDecision;
use crate::error::{io_err, ScanError};
use crate::scanner::ScanEntry;

/// Display `path` relative to the current working directory when it lies
/// underneath it; otherwise unchanged.
pub fn nice_path(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => path
            .strip_prefix(&cwd)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

/// Emits one status line per processed file, in discovery order.
pub struct Reporter<W> {
    porcelain: bool,
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(porcelain: bool, out: W) -> Self {
        Reporter { porcelain, out }
    }

    pub fn emit(&mut self, entry: &ScanEntry) -> Result<(), ScanError> {
        let line = if self.porcelain {
            format_porcelain(entry)
        } else {
            format_human(entry)
        };
        writeln!(self.out, "{line}").map_err(|e| io_err("<report>", e))
    }
}

/// `{MODE}\t{src}\t{dst}`
fn format_porcelain(entry: &ScanEntry) -> String {
    format!(
        "{}\t{}\t{}",
        entry.decision,
        nice_path(&entry.template_path).display(),
        nice_path(&entry.output_path).display(),
    )
}

fn format_human(entry: &ScanEntry) -> String {
    let src = nice_path(&entry.template_path);
    let dst = nice_path(&entry.output_path);
    match entry.decision {
        WriteDecision::Keep => {
            format!("No change made to {}. Skipping.", dst.display())
        }
        WriteDecision::Modify => {
            format!("Re-writing {} to {}.", src.display(), dst.display())
        }
        WriteDecision::Create => {
            format!("Writing {} to new file {}.", src.display(), dst.display())
        }
        WriteDecision::Fail => {
            format!("Failed to process {}. Skipping.", src.display())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
