//! Error types for destination path resolution.

use std::path::PathBuf;
use thiserror::Error;

use crate::mounts::MountError;

/// Errors that can occur while computing a destination path.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// The source is not inside the base directory.
    #[error("{source_path} is not inside base directory {base_dir}")]
    OutsideBase {
        source_path: PathBuf,
        base_dir: PathBuf,
    },

    /// The mirrored path would leave the output root.
    #[error("Destination for {source_path} escapes the output root")]
    EscapesOutputRoot { source_path: PathBuf },

    /// The destination filesystem could not be determined.
    #[error(transparent)]
    Mount(#[from] MountError),
}
