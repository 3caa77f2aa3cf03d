//! Directory scan: discover templates, render, classify, write, report.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use templater_render::TemplateEngine;

use crate::classify::{self, WriteDecision};
use crate::error::ScanError;
use crate::gate::{OutputGate, WritePolicy};
use crate::path_map::{map_output_path, PrefixRewrite};
use crate::pattern::{is_template_name, DEFAULT_EXTENSION};
use crate::report::Reporter;

/// Directory name reserved for the tool's own use; never descended into.
pub const PRIVATE_DIR_NAME: &str = ".templater";

/// Options controlling a scan run.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Template extension, without the leading dot.
    pub suffix: String,
    /// Directory names to skip without descending.
    pub exclude_dirs: Vec<OsString>,
    /// Optional source-tree → destination-tree prefix substitution.
    pub rewrite: Option<PrefixRewrite>,
    /// Write-time behavior (dry-run, interactive, read-only).
    pub policy: WritePolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            suffix: DEFAULT_EXTENSION.to_string(),
            exclude_dirs: vec![OsString::from(PRIVATE_DIR_NAME)],
            rewrite: None,
            policy: WritePolicy::default(),
        }
    }
}

/// One processed template: the decision plus both paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub decision: WriteDecision,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
}

/// Walk `root` and process every matching template file.
///
/// Each file runs to completion (render → classify → gated write → report
/// line) before the next is considered. Per-file open, render, and write
/// failures are logged and do not stop the scan; prefix-rewrite mismatches
/// and walk errors are fatal.
///
/// Returns the processed entries in discovery order. The walk is sorted by
/// file name per directory, but callers must not rely on cross-platform
/// ordering — only on the set of entries.
pub fn scan<R, W>(
    root: &Path,
    engine: &TemplateEngine,
    opts: &ScanOptions,
    prompt_input: R,
    reporter: &mut Reporter<W>,
) -> Result<Vec<ScanEntry>, ScanError>
where
    R: BufRead,
    W: Write,
{
    let mut gate = OutputGate::new(opts.policy, prompt_input);
    let mut entries = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, &opts.exclude_dirs));

    for dirent in walker {
        let dirent = dirent?;
        if !dirent.file_type().is_file() {
            continue;
        }
        let name = dirent.file_name().to_string_lossy();
        if !is_template_name(&name, &opts.suffix) {
            continue;
        }

        if let Some(entry) = process_one(dirent.path(), engine, opts, &mut gate)? {
            reporter.emit(&entry)?;
            entries.push(entry);
        }
    }

    Ok(entries)
}

fn is_excluded(entry: &walkdir::DirEntry, exclude_dirs: &[OsString]) -> bool {
    entry.file_type().is_dir()
        && exclude_dirs.iter().any(|d| d.as_os_str() == entry.file_name())
}

/// Render one template and perform the gated write.
///
/// Returns `Ok(None)` when the template could not be opened (logged, scan
/// continues). `Err` only for fatal conditions.
fn process_one<R: BufRead>(
    template_path: &Path,
    engine: &TemplateEngine,
    opts: &ScanOptions,
    gate: &mut OutputGate<R>,
) -> Result<Option<ScanEntry>, ScanError> {
    let output_path = map_output_path(template_path, &opts.suffix, opts.rewrite.as_ref())?;

    let source = match std::fs::read_to_string(template_path) {
        Ok(s) => s,
        Err(err) => {
            log::warn!(
                "failed to open for reading {}: {err} ... skipping",
                template_path.display()
            );
            return Ok(None);
        }
    };

    let rendered = engine.render(&source);
    if let Err(err) = &rendered {
        log::warn!(
            "failed to execute template {}: {err}",
            template_path.display()
        );
    }

    let existing = classify::read_existing(&output_path);
    let mut decision = classify::classify(
        rendered.as_ref().map(|s| s.as_bytes()),
        existing.as_deref(),
    );

    if decision.needs_write() {
        // classify() only needs a write when rendering succeeded.
        let bytes = rendered.as_deref().unwrap_or_default().as_bytes();
        if let Err(err) = gate.write(&output_path, bytes) {
            log::warn!("failed to write {}: {err}", output_path.display());
            decision = WriteDecision::Fail;
        }
    }

    Ok(Some(ScanEntry {
        decision,
        template_path: template_path.to_path_buf(),
        output_path,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
