//! Per-item processing: destination, idempotence check, tags, conversion.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::error::{error_chain, ProcessError};
use super::traits::ItemHandler;
use super::types::FileOutcome;
use crate::converter::{ConversionJob, Converter, SkipReason, SourceKind};
use crate::destination::DestinationResolver;
use crate::metrics;
use crate::tags::{TagExtractor, TagSet};

/// Takes one source path all the way to its mirrored output.
pub struct FileProcessor<C: Converter> {
    converter: Arc<C>,
    destinations: DestinationResolver,
    tags: TagExtractor,
    dry_run: bool,
}

impl<C: Converter> FileProcessor<C> {
    pub fn new(converter: Arc<C>, destinations: DestinationResolver, tags: TagExtractor) -> Self {
        Self {
            converter,
            destinations,
            tags,
            dry_run: false,
        }
    }

    /// In dry-run mode items are resolved and classified but nothing is
    /// written and no subprocess is started.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    async fn process(&self, source: &Path) -> Result<FileOutcome, ProcessError> {
        let destination = self.destinations.resolve(source).await?;

        if is_regular_file(&destination).await {
            debug!(
                source = %source.display(),
                destination = %destination.display(),
                "Destination exists, skipping"
            );
            return Ok(FileOutcome::Skipped(SkipReason::AlreadyExists));
        }

        let kind = self.converter.classify(source);

        if self.dry_run {
            return Ok(plan(source, &destination, kind));
        }

        let tags = match kind {
            SourceKind::Transcodable => self.tags.extract(source).await,
            _ => TagSet::new(),
        };

        let job = ConversionJob::new(source, destination).with_tags(tags);
        let started = Instant::now();
        let result = self.converter.convert(job).await;

        if kind == SourceKind::Transcodable {
            let label = if result.is_ok() { "success" } else { "failure" };
            metrics::TRANSCODE_DURATION
                .with_label_values(&[label])
                .observe(started.elapsed().as_secs_f64());
        }

        Ok(result?.into())
    }
}

fn plan(source: &Path, destination: &Path, kind: SourceKind) -> FileOutcome {
    match kind {
        SourceKind::Unsupported => {
            warn!(path = %source.display(), "Unknown file type, skipping");
            FileOutcome::Skipped(SkipReason::UnsupportedFormat)
        }
        SourceKind::Target => {
            info!(source = %source.display(), destination = %destination.display(), "Would copy");
            FileOutcome::Planned
        }
        SourceKind::Transcodable => {
            info!(source = %source.display(), destination = %destination.display(), "Would transcode");
            FileOutcome::Planned
        }
    }
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

#[async_trait]
impl<C: Converter + 'static> ItemHandler for FileProcessor<C> {
    async fn handle(&self, item: PathBuf) -> FileOutcome {
        let outcome = match self.process(&item).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = error_chain(&e);
                match e.stderr() {
                    Some(stderr) => error!(path = %item.display(), stderr = %stderr, "{}", message),
                    None => error!(path = %item.display(), "{}", message),
                }
                FileOutcome::Failed(message)
            }
        };
        metrics::FILES_TOTAL.with_label_values(&[outcome.label()]).inc();
        outcome
    }
}
