//! Work distribution over a fixed pool of workers.
//!
//! The queue is filled once from discovery. `WorkDistributor` spawns
//! `min(items, oversubscription × cores)` workers that each pop one path at
//! a time and hand it to an [`ItemHandler`]; [`FileProcessor`] is the handler
//! that resolves the destination, skips existing outputs, extracts tags and
//! runs the converter. Per-file failures are folded into [`FileOutcome`] and
//! counted in the returned [`BatchReport`].

mod config;
mod error;
mod item;
mod pool;
mod queue;
mod traits;
mod types;

pub use config::ProcessorConfig;
pub use error::{error_chain, ProcessError};
pub use item::FileProcessor;
pub use pool::WorkDistributor;
pub use queue::WorkQueue;
pub use traits::ItemHandler;
pub use types::{BatchReport, FileOutcome};
