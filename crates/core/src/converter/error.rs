//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

use super::types::PipelineStage;

/// Errors that can occur during conversion.
///
/// Every variant is scoped to a single file; none of them stop a batch.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The destination's parent directory could not be created.
    #[error("Failed to create output directory {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Verbatim copy failed.
    #[error("Failed to copy {source_path} to {destination}")]
    CopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A pipeline process could not be started.
    #[error("Failed to start {stage} command `{command}` for {source_path}")]
    SpawnFailed {
        stage: PipelineStage,
        command: String,
        source_path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A pipeline process exited unsuccessfully.
    #[error("{stage} of {source_path} failed ({status})")]
    ProcessFailed {
        stage: PipelineStage,
        source_path: PathBuf,
        status: String,
        stderr: Option<String>,
    },

    /// I/O error while driving the pipeline.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a spawn failure error.
    pub fn spawn_failed(
        stage: PipelineStage,
        command: impl Into<String>,
        source_path: impl Into<PathBuf>,
        error: std::io::Error,
    ) -> Self {
        Self::SpawnFailed {
            stage,
            command: command.into(),
            source_path: source_path.into(),
            error,
        }
    }

    /// Creates a process failure error, keeping stderr only when non-blank.
    pub fn process_failed(
        stage: PipelineStage,
        source_path: impl Into<PathBuf>,
        status: impl Into<String>,
        stderr: Option<String>,
    ) -> Self {
        Self::ProcessFailed {
            stage,
            source_path: source_path.into(),
            status: status.into(),
            stderr: stderr.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Whether the failure is a missing executable.
    pub fn is_missing_executable(&self) -> bool {
        matches!(
            self,
            Self::SpawnFailed { error, .. } if error.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Captured stderr of a failed process, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::ProcessFailed { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}
