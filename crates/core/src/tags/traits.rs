//! Trait definitions for the tags module.

use std::collections::HashMap;
use std::path::Path;

use super::error::TagReadError;

/// Raw key/value metadata as reported by a reader, keys in lowercase.
pub type RawTags = HashMap<String, String>;

/// Reads metadata from an audio file.
///
/// Implementations are synchronous; the extractor runs them on the
/// blocking pool.
pub trait TagReader: Send + Sync {
    /// Returns the name of this reader implementation.
    fn name(&self) -> &str;

    /// Reads the file's tags.
    ///
    /// Returns `Ok(None)` when the format is recognized but carries no tag.
    fn read(&self, path: &Path) -> Result<Option<RawTags>, TagReadError>;
}
