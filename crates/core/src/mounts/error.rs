//! Error types for the mounts module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a filesystem type.
#[derive(Debug, Error)]
pub enum MountError {
    /// The mount table could not be read.
    #[error("Failed to read mount table {path}")]
    TableUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path could not be made absolute.
    #[error("Failed to make path absolute: {path}")]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No mounted filesystem contains the path.
    #[error("No mounted filesystem contains {path}")]
    NoMatchingFilesystem { path: PathBuf },
}
