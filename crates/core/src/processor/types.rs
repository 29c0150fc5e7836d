//! Types for the processor module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::converter::{ConversionOutcome, SkipReason};

/// What happened to one work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    Copied,
    Transcoded,
    /// Dry run: the item would have been copied or transcoded.
    Planned,
    Skipped(SkipReason),
    /// The item failed; the message carries the full error chain.
    Failed(String),
}

impl FileOutcome {
    /// Label used in metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::Transcoded => "transcoded",
            Self::Planned => "planned",
            Self::Skipped(SkipReason::AlreadyExists) => "skipped_already_exists",
            Self::Skipped(SkipReason::UnsupportedFormat) => "skipped_unsupported_format",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<ConversionOutcome> for FileOutcome {
    fn from(outcome: ConversionOutcome) -> Self {
        match outcome {
            ConversionOutcome::Copied => Self::Copied,
            ConversionOutcome::Transcoded => Self::Transcoded,
            ConversionOutcome::Skipped(reason) => Self::Skipped(reason),
        }
    }
}

/// Totals for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub copied: u64,
    pub transcoded: u64,
    pub planned: u64,
    pub skipped_existing: u64,
    pub skipped_unsupported: u64,
    pub failed: u64,
    /// Wall time from the first worker start to the last worker exit.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Items that reached an outcome.
    pub fn completed(&self) -> u64 {
        self.copied
            + self.transcoded
            + self.planned
            + self.skipped_existing
            + self.skipped_unsupported
            + self.failed
    }

    pub fn skipped(&self) -> u64 {
        self.skipped_existing + self.skipped_unsupported
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files in {:.1}s: {} transcoded, {} copied, {} skipped ({} existing, {} unsupported), {} failed",
            self.completed(),
            self.elapsed.as_secs_f64(),
            self.transcoded,
            self.copied,
            self.skipped(),
            self.skipped_existing,
            self.skipped_unsupported,
            self.failed,
        )?;
        if self.planned > 0 {
            write!(f, ", {} planned", self.planned)?;
        }
        Ok(())
    }
}

/// Outcome counters shared by all workers of a batch.
#[derive(Debug, Default)]
pub(crate) struct PoolStats {
    copied: AtomicU64,
    transcoded: AtomicU64,
    planned: AtomicU64,
    skipped_existing: AtomicU64,
    skipped_unsupported: AtomicU64,
    failed: AtomicU64,
}

impl PoolStats {
    pub(crate) fn record(&self, outcome: &FileOutcome) {
        let counter = match outcome {
            FileOutcome::Copied => &self.copied,
            FileOutcome::Transcoded => &self.transcoded,
            FileOutcome::Planned => &self.planned,
            FileOutcome::Skipped(SkipReason::AlreadyExists) => &self.skipped_existing,
            FileOutcome::Skipped(SkipReason::UnsupportedFormat) => &self.skipped_unsupported,
            FileOutcome::Failed(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn to_report(&self, elapsed: Duration) -> BatchReport {
        BatchReport {
            copied: self.copied.load(Ordering::Relaxed),
            transcoded: self.transcoded.load(Ordering::Relaxed),
            planned: self.planned.load(Ordering::Relaxed),
            skipped_existing: self.skipped_existing.load(Ordering::Relaxed),
            skipped_unsupported: self.skipped_unsupported.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count_every_outcome() {
        let stats = PoolStats::default();
        stats.record(&FileOutcome::Copied);
        stats.record(&FileOutcome::Transcoded);
        stats.record(&FileOutcome::Transcoded);
        stats.record(&FileOutcome::Skipped(SkipReason::AlreadyExists));
        stats.record(&FileOutcome::Skipped(SkipReason::UnsupportedFormat));
        stats.record(&FileOutcome::Failed("boom".to_string()));

        let report = stats.to_report(Duration::from_secs(3));
        assert_eq!(report.completed(), 6);
        assert_eq!(report.transcoded, 2);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_report_summary_line() {
        let report = BatchReport {
            copied: 1,
            transcoded: 2,
            skipped_unsupported: 1,
            elapsed: Duration::from_millis(1500),
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "4 files in 1.5s: 2 transcoded, 1 copied, 1 skipped (0 existing, 1 unsupported), 0 failed"
        );
    }

    #[test]
    fn test_outcome_labels_are_distinct() {
        let outcomes = [
            FileOutcome::Copied,
            FileOutcome::Transcoded,
            FileOutcome::Planned,
            FileOutcome::Skipped(SkipReason::AlreadyExists),
            FileOutcome::Skipped(SkipReason::UnsupportedFormat),
            FileOutcome::Failed(String::new()),
        ];
        let labels: std::collections::HashSet<_> = outcomes.iter().map(FileOutcome::label).collect();
        assert_eq!(labels.len(), outcomes.len());
    }
}
