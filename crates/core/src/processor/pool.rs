//! Worker pool draining a [`WorkQueue`].

use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, error};

use super::queue::WorkQueue;
use super::traits::ItemHandler;
use super::types::{BatchReport, PoolStats};
use crate::metrics;

/// Runs a fixed number of workers over a shared queue.
pub struct WorkDistributor<H: ItemHandler> {
    handler: Arc<H>,
}

impl<H: ItemHandler + 'static> WorkDistributor<H> {
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Spawns `workers` workers and waits until every one has exited.
    ///
    /// Each worker pops one item at a time and hands it to the handler until
    /// the queue reports empty. There is no cancellation; dropping the
    /// returned future aborts the workers.
    pub async fn run(&self, queue: WorkQueue, workers: usize) -> BatchReport {
        let started = Instant::now();
        let stats = Arc::new(PoolStats::default());
        let mut set = JoinSet::new();

        debug!(workers, items = queue.len().await, "Starting workers");

        for id in 0..workers {
            let queue = queue.clone();
            let handler = Arc::clone(&self.handler);
            let stats = Arc::clone(&stats);
            set.spawn(worker_loop(id, queue, handler, stats));
        }

        while let Some(result) = set.join_next().await {
            if let Err(e) = result {
                error!("Worker task failed: {}", e);
            }
        }

        stats.to_report(started.elapsed())
    }
}

async fn worker_loop<H: ItemHandler>(
    id: usize,
    queue: WorkQueue,
    handler: Arc<H>,
    stats: Arc<PoolStats>,
) {
    let _active = ActiveWorker::enter();
    let mut processed = 0usize;

    while let Some(item) = queue.pop().await {
        let outcome = handler.handle(item).await;
        stats.record(&outcome);
        processed += 1;
    }

    debug!(worker = id, processed, "Queue drained, worker exiting");
}

/// Keeps the active-workers gauge accurate even if a worker panics.
struct ActiveWorker;

impl ActiveWorker {
    fn enter() -> Self {
        metrics::ACTIVE_WORKERS.inc();
        Self
    }
}

impl Drop for ActiveWorker {
    fn drop(&mut self) {
        metrics::ACTIVE_WORKERS.dec();
    }
}
