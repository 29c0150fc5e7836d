//! Decoder | encoder pipeline implementation.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::commands::{decode_args, describe, encode_args};
use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{ConversionJob, ConversionOutcome, PipelineStage, SkipReason, SourceKind};

/// Lines of captured stderr kept in a failure report.
const STDERR_TAIL_LINES: usize = 20;

/// Converter that pipes an external decoder into an external encoder.
pub struct PipedConverter {
    config: ConverterConfig,
}

impl PipedConverter {
    /// Creates a new converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Returns the converter configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Creates the destination's parent directories.
    ///
    /// A directory created concurrently by another worker is not an error.
    async fn ensure_parent(destination: &Path) -> Result<(), ConverterError> {
        let Some(parent) = destination.parent() else {
            return Ok(());
        };
        match tokio::fs::create_dir_all(parent).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && parent.is_dir() => Ok(()),
            Err(source) => Err(ConverterError::DirectoryCreation {
                path: parent.to_path_buf(),
                source,
            }),
        }
    }

    /// Copies the source verbatim, carrying over access and modification times.
    ///
    /// Any failure removes whatever reached the destination.
    async fn copy(&self, job: &ConversionJob) -> Result<ConversionOutcome, ConverterError> {
        if let Err(error) = copy_with_times(&job.source, &job.destination).await {
            remove_partial(&job.destination).await;
            return Err(ConverterError::CopyFailed {
                source_path: job.source.clone(),
                destination: job.destination.clone(),
                error,
            });
        }

        debug!(source = %job.source.display(), destination = %job.destination.display(), "Copied");
        Ok(ConversionOutcome::Copied)
    }

    /// Runs decoder | encoder for the job.
    ///
    /// Both children are spawned `kill_on_drop`, so any early return reaps
    /// whatever was started. Our copy of the pipe's read end lives in the
    /// encoder's `Command`, which is dropped right after spawning; an
    /// encoder that dies early therefore hands the decoder a broken pipe.
    async fn transcode(&self, job: &ConversionJob) -> Result<ConversionOutcome, ConverterError> {
        let decoder_args = decode_args(&self.config, &job.source);
        let mut decoder = Command::new(&self.config.decoder_path)
            .args(&decoder_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ConverterError::spawn_failed(
                    PipelineStage::Decode,
                    describe(&self.config.decoder_path, &decoder_args),
                    &job.source,
                    e,
                )
            })?;

        let intermediate: Stdio = decoder
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("decoder stdout was not captured"))?
            .try_into()?;

        let encoder_args = encode_args(&self.config, &job.tags, &job.destination);
        let spawned = {
            let mut command = Command::new(&self.config.encoder_path);
            command
                .args(&encoder_args)
                .stdin(intermediate)
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .kill_on_drop(true);
            command.spawn()
        };

        let encoder = match spawned {
            Ok(encoder) => encoder,
            Err(e) => {
                reap(decoder).await;
                return Err(ConverterError::spawn_failed(
                    PipelineStage::Encode,
                    describe(&self.config.encoder_path, &encoder_args),
                    &job.source,
                    e,
                ));
            }
        };

        let (decoded, encoded) = tokio::join!(decoder.wait_with_output(), encoder.wait_with_output());

        let failure = check_exit(PipelineStage::Decode, &job.source, decoded)
            .err()
            .or_else(|| check_exit(PipelineStage::Encode, &job.source, encoded).err());

        match failure {
            Some(e) => {
                remove_partial(&job.destination).await;
                Err(e)
            }
            None => {
                debug!(source = %job.source.display(), destination = %job.destination.display(), "Transcoded");
                Ok(ConversionOutcome::Transcoded)
            }
        }
    }

    async fn probe(&self, program: &Path, flag: &str, stage: PipelineStage) -> Result<(), ConverterError> {
        Command::new(program)
            .arg(flag)
            .stdin(Stdio::null())
            .output()
            .await
            .map(|_| ())
            .map_err(|e| ConverterError::spawn_failed(stage, format!("{} {}", program.display(), flag), program, e))
    }
}

/// Kills a child that will never be used and waits for it.
async fn reap(mut child: Child) {
    if let Err(e) = child.start_kill() {
        debug!("Failed to kill child: {}", e);
    }
    if let Err(e) = child.wait().await {
        debug!("Failed to wait for child: {}", e);
    }
}

/// Turns a finished child into an error when it did not succeed.
fn check_exit(
    stage: PipelineStage,
    source: &Path,
    result: std::io::Result<Output>,
) -> Result<(), ConverterError> {
    let output = result?;
    if output.status.success() {
        return Ok(());
    }
    Err(ConverterError::process_failed(
        stage,
        source,
        output.status.to_string(),
        Some(stderr_tail(&output.stderr)),
    ))
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .lines()
        .flat_map(|line| line.rsplit('\r').next())
        .filter(|line| !line.trim().is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Copies `source` to `destination` and carries over its timestamps.
///
/// Source metadata is read before anything is written.
async fn copy_with_times(source: &Path, destination: &Path) -> std::io::Result<()> {
    let metadata = tokio::fs::metadata(source).await?;
    let accessed = filetime::FileTime::from_last_access_time(&metadata);
    let modified = filetime::FileTime::from_last_modification_time(&metadata);

    tokio::fs::copy(source, destination).await?;

    let destination = destination.to_path_buf();
    tokio::task::spawn_blocking(move || filetime::set_file_times(&destination, accessed, modified))
        .await
        .map_err(std::io::Error::other)?
}

/// Deletes a destination left behind by a failed operation.
async fn remove_partial(destination: &Path) {
    match tokio::fs::remove_file(destination).await {
        Ok(()) => debug!(path = %destination.display(), "Removed partial output"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %destination.display(), "Failed to remove partial output: {}", e),
    }
}

#[async_trait]
impl Converter for PipedConverter {
    fn name(&self) -> &str {
        "piped"
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
            warn!(path = %job.source.display(), "Unknown file type, skipping");
            return Ok(ConversionOutcome::Skipped(SkipReason::UnsupportedFormat));
        }

        Self::ensure_parent(&job.destination).await?;

        match kind {
            SourceKind::Target => self.copy(&job).await,
            _ => self.transcode(&job).await,
        }
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        self.probe(&self.config.decoder_path, "-version", PipelineStage::Decode)
            .await?;
        self.probe(&self.config.encoder_path, "--version", PipelineStage::Encode)
            .await
    }
}
