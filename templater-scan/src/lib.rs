//! # templater-scan
//!
//! Directory scanning and gated writes: walks a tree for template files,
//! maps each to its output path, renders, classifies the pending change
//! (CREATE / MODIFY / KEEP / FAIL), and performs or suppresses the write.
//!
//! Call [`scan`] with a resolved engine and [`ScanOptions`] to process a
//! tree; single-file callers use [`OutputGate`] directly.

pub mod classify;
pub mod error;
pub mod gate;
pub mod path_map;
pub mod pattern;
pub mod report;
pub mod scanner;

pub use classify::WriteDecision;
pub use error::ScanError;
pub use gate::{OutputGate, WriteOutcome, WritePolicy};
pub use path_map::{absolutize, map_output_path, PrefixRewrite};
pub use pattern::{is_template_name, DEFAULT_EXTENSION};
pub use report::{nice_path, Reporter};
pub use scanner::{scan, ScanEntry, ScanOptions, PRIVATE_DIR_NAME};
