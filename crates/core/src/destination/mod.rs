//! Destination path resolution.
//!
//! Maps a source file under the base directory to its mirrored location
//! under the output root, swapping the extension for the target codec's
//! and replacing characters the destination filesystem cannot store.

mod config;
mod error;
mod resolver;

pub use config::DestinationConfig;
pub use error::DestinationError;
pub use resolver::DestinationResolver;
