//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ConverterError;
use super::types::{ConversionJob, ConversionOutcome, SourceKind};

/// Brings one source file into the output tree.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Decides how a source is handled from its extension.
    fn classify(&self, path: &Path) -> SourceKind;

    /// Extension given to every destination file.
    fn target_extension(&self) -> &str;

    /// Copies or transcodes `job.source` to `job.destination`.
    ///
    /// Callers are expected to have checked that the destination does not
    /// exist. On failure no file is left at the destination.
    async fn convert(&self, job: ConversionJob) -> Result<ConversionOutcome, ConverterError>;

    /// Checks that the external tools can be started.
    async fn validate(&self) -> Result<(), ConverterError>;
}
