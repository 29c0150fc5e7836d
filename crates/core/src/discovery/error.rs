//! Error types for input discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the command-line inputs. All of them abort the run
/// before any work starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Base directory {path} does not exist")]
    BaseDirMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Base directory {path} is not a directory")]
    BaseDirNotDirectory { path: PathBuf },

    #[error("Input {path} does not exist")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input {path} is not inside base directory {base_dir}")]
    OutsideBase { path: PathBuf, base_dir: PathBuf },

    #[error("No input paths given")]
    NoInputs,
}
