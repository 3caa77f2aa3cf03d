//! Output path derivation: suffix stripping and prefix rewriting.

use std::path::{Component, Path, PathBuf};

use crate::error::ScanError;

/// A source-tree → destination-tree prefix substitution.
///
/// Both paths must be absolute by the time mapping runs; callers absolutize
/// CLI arguments with [`absolutize`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRewrite {
    pub original: PathBuf,
    pub new: PathBuf,
}

/// Resolve `path` against the current working directory without touching the
/// filesystem (the target may not exist yet). `.` and `..` components are
/// collapsed lexically.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Map a discovered template path to its output path.
///
/// The first occurrence of `.{suffix}` is removed from the file name; the
/// directory is either kept verbatim (no rewrite) or has `rewrite.original`
/// replaced by `rewrite.new`. A template whose directory is not contained
/// under `rewrite.original` is a configuration error, fatal to the run.
pub fn map_output_path(
    template_path: &Path,
    suffix: &str,
    rewrite: Option<&PrefixRewrite>,
) -> Result<PathBuf, ScanError> {
    if !template_path.is_absolute() {
        return Err(ScanError::RelativePath {
            path: template_path.to_path_buf(),
        });
    }

    let dir = template_path.parent().unwrap_or(Path::new("/"));
    let name = template_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let out_dir = match rewrite {
        Some(rw) => {
            // Empty remainder: output dir is exactly `new`, no trailing join.
            let rest = dir.strip_prefix(&rw.original).map_err(|_| {
                ScanError::PrefixMismatch {
                    dir: dir.to_path_buf(),
                    prefix: rw.original.clone(),
                }
            })?;
            rw.new.join(rest)
        }
        None => dir.to_path_buf(),
    };

    Ok(out_dir.join(strip_suffix_once(&name, suffix)))
}

/// Remove the first occurrence of `.{suffix}` from a file name, leaving any
/// later occurrence untouched.
fn strip_suffix_once(name: &str, suffix: &str) -> String {
    let marker = format!(".{suffix}");
    match name.find(&marker) {
        Some(idx) => {
            let mut out = String::with_capacity(name.len() - marker.len());
            out.push_str(&name[..idx]);
            out.push_str(&name[idx + marker.len()..]);
            out
        }
        None => name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
