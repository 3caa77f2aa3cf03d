//! Change classification: what touching the output path would do.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use templater_render::RenderError;

/// The pending operation for one template, derived by comparing rendered
/// output against the current contents of the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Output path does not exist yet.
    Create,
    /// Output path exists with different content.
    Modify,
    /// Output path exists and is byte-identical; nothing to do.
    Keep,
    /// Rendering failed; existing content is irrelevant.
    Fail,
}

impl WriteDecision {
    /// Porcelain token for this decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteDecision::Create => "CREATE",
            WriteDecision::Modify => "MODIFY",
            WriteDecision::Keep => "KEEP",
            WriteDecision::Fail => "FAIL",
        }
    }

    /// Whether this decision calls for a filesystem write.
    pub fn needs_write(&self) -> bool {
        matches!(self, WriteDecision::Create | WriteDecision::Modify)
    }
}

impl fmt::Display for WriteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a pending operation.
///
/// Comparison is byte-exact — no modification times, no checksums.
pub fn classify(
    rendered: Result<&[u8], &RenderError>,
    existing: Option<&[u8]>,
) -> WriteDecision {
    match rendered {
        Err(_) => WriteDecision::Fail,
        Ok(bytes) => match existing {
            None => WriteDecision::Create,
            Some(current) if current == bytes => WriteDecision::Keep,
            Some(_) => WriteDecision::Modify,
        },
    }
}

/// Read the current contents of an output path, if any.
///
/// `NotFound` means the target does not exist. Any other read error is
/// logged and degrades to "does not exist" — the decision becomes CREATE and
/// the subsequent write surfaces the real error if the path is unusable.
pub fn read_existing(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            log::warn!(
                "unexpected error reading existing output {}: {err}",
                path.display()
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
