//! Trait definitions for the processor module.

use async_trait::async_trait;
use std::path::PathBuf;

use super::types::FileOutcome;

/// Processes one work item end to end.
///
/// Implementations never fail: every problem is folded into the outcome so
/// one bad file cannot stop its worker.
#[async_trait]
pub trait ItemHandler: Send + Sync {
    async fn handle(&self, item: PathBuf) -> FileOutcome;
}
