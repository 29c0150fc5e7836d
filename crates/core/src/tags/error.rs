//! Error types for the tags module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors a [`TagReader`](super::TagReader) can report.
///
/// None of these abort a transcode; the extractor downgrades them to an
/// empty tag set.
#[derive(Debug, Error)]
pub enum TagReadError {
    /// The file's audio header could not be found or parsed.
    #[error("Header not found in {path}: {reason}")]
    HeaderNotFound { path: PathBuf, reason: String },

    /// The file could not be read.
    #[error("Failed to read tags from {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}
