//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{
    ConversionJob, ConversionOutcome, Converter, ConverterConfig, ConverterError, PipelineStage,
    SkipReason, SourceKind,
};

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Classifies sources with the default [`ConverterConfig`] and writes a
/// small placeholder file at the destination instead of running any
/// process, so skip-if-exists behaves as it would for real output.
///
/// # Example
///
/// ```rust,ignore
/// use transmirror_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.fail_on("/music/A/broken.flac").await;
///
/// let outcome = converter.convert(job).await?;
///
/// let conversions = converter.recorded_conversions().await;
/// assert_eq!(conversions.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockConverter {
    config: ConverterConfig,
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Sources whose conversion fails.
    failing: Arc<RwLock<HashSet<PathBuf>>>,
    /// Simulated conversion duration in milliseconds.
    conversion_duration_ms: Arc<RwLock<u64>>,
    /// Whether `validate` reports the tools as present.
    tools_available: Arc<RwLock<bool>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            config: ConverterConfig::default(),
            conversions: Arc::new(RwLock::new(Vec::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            conversion_duration_ms: Arc::new(RwLock::new(0)),
            tools_available: Arc::new(RwLock::new(true)),
        }
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions performed.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Make conversions of `source` fail like a non-zero encoder exit.
    pub async fn fail_on(&self, source: impl AsRef<Path>) {
        self.failing
            .write()
            .await
            .insert(source.as_ref().to_path_buf());
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration_ms(&self, ms: u64) {
        *self.conversion_duration_ms.write().await = ms;
    }

    /// Make `validate` fail as if the executables were missing.
    pub async fn set_tools_available(&self, available: bool) {
        *self.tools_available.write().await = available;
    }

    async fn record(&self, job: ConversionJob, success: bool) {
        self.conversions
            .write()
            .await
            .push(RecordedConversion { job, success });
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    fn classify(&self, path: &Path) -> SourceKind {
        self.config.classify(path)
    }

    fn target_extension(&self) -> &str {
        &self.config.target_extension
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionOutcome, ConverterError> {
        let kind = self.classify(&job.source);
        if kind == SourceKind::Unsupported {
            self.record(job, true).await;
            return Ok(ConversionOutcome::Skipped(SkipReason::UnsupportedFormat));
        }

        let duration = *self.conversion_duration_ms.read().await;
        if duration > 0 {
            tokio::time::sleep(Duration::from_millis(duration)).await;
        }

        if self.failing.read().await.contains(&job.source) {
            let error = ConverterError::process_failed(
                PipelineStage::Encode,
                &job.source,
                "exit status: 1",
                Some("mock encoder failure".to_string()),
            );
            self.record(job, false).await;
            return Err(error);
        }

        if let Some(parent) = job.destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&job.destination, b"mock output").await?;
        self.record(job, true).await;

        Ok(match kind {
            SourceKind::Target => ConversionOutcome::Copied,
            _ => ConversionOutcome::Transcoded,
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if *self.tools_available.read().await {
            Ok(())
        } else {
            Err(ConverterError::spawn_failed(
                PipelineStage::Decode,
                "mock -version",
                "mock",
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ))
        }
    }
}
