//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::tags::TagSet;

/// How a source file is handled, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Already in the target codec; copied verbatim.
    Target,
    /// A format the decoder handles; transcoded.
    Transcodable,
    /// Anything else; skipped.
    Unsupported,
}

/// One file to bring into the output tree.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// Absolute source path.
    pub source: PathBuf,
    /// Resolved destination path.
    pub destination: PathBuf,
    /// Tags to embed; empty for copies.
    pub tags: TagSet,
}

impl ConversionJob {
    /// Creates a job without tags.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            tags: TagSet::new(),
        }
    }

    /// Attaches tags to the job.
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }
}

/// Why a file produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The destination was already there.
    AlreadyExists,
    /// The extension is not in the supported set.
    UnsupportedFormat,
}

impl SkipReason {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::UnsupportedFormat => "unsupported_format",
        }
    }
}

/// Result of a conversion that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// The source was copied byte for byte.
    Copied,
    /// The source was decoded and re-encoded.
    Transcoded,
    /// Nothing was written.
    Skipped(SkipReason),
}

/// The two halves of the transcode pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Decode,
    Encode,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => f.write_str("decode"),
            Self::Encode => f.write_str("encode"),
        }
    }
}
