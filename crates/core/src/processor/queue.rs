//! Shared queue of work items.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Queue of source paths, filled once before workers start.
///
/// Cloning shares the underlying queue. `pop` hands each item to exactly one
/// caller and returns `None` as soon as the queue is drained; nothing is ever
/// pushed after construction, so `None` is final.
#[derive(Debug, Clone, Default)]
pub struct WorkQueue {
    items: Arc<Mutex<VecDeque<PathBuf>>>,
}

impl WorkQueue {
    /// Creates a queue holding `items` in order.
    pub fn new(items: impl IntoIterator<Item = PathBuf>) -> Self {
        items.into_iter().collect()
    }

    /// Takes the next item, or `None` once the queue is empty.
    pub async fn pop(&self) -> Option<PathBuf> {
        self.items.lock().await.pop_front()
    }

    /// Items not yet taken.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

impl FromIterator<PathBuf> for WorkQueue {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            items: Arc::new(Mutex::new(iter.into_iter().collect())),
        }
    }
}
