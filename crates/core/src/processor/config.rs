//! Configuration for the processor module.

use serde::{Deserialize, Serialize};

/// Configuration for the worker pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Workers spawned per available CPU.
    #[serde(default = "default_oversubscription")]
    pub oversubscription: usize,

    /// Hard cap on the number of workers.
    #[serde(default)]
    pub max_workers: Option<usize>,

    /// Resolve and classify every item without writing anything.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_oversubscription() -> usize {
    2
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            oversubscription: default_oversubscription(),
            max_workers: None,
            dry_run: false,
        }
    }
}

impl ProcessorConfig {
    /// Sets the hard worker cap.
    pub fn with_max_workers(mut self, max: usize) -> Self {
        self.max_workers = Some(max);
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Number of workers for a batch of `items` on this machine.
    ///
    /// `jobs` replaces the per-CPU computation when given.
    pub fn worker_count(&self, items: usize, jobs: Option<usize>) -> usize {
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.worker_count_for(items, parallelism, jobs)
    }

    /// Worker count for a known parallelism.
    ///
    /// Never more workers than items, and at least one when there is work.
    pub fn worker_count_for(&self, items: usize, parallelism: usize, jobs: Option<usize>) -> usize {
        if items == 0 {
            return 0;
        }
        let mut workers = jobs.unwrap_or(self.oversubscription.saturating_mul(parallelism));
        if let Some(max) = self.max_workers {
            workers = workers.min(max);
        }
        workers.clamp(1, items)
    }
}
