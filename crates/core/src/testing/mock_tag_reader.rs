//! Mock tag reader for testing.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::tags::{RawTags, TagReadError, TagReader};

/// Tag reader answering from an in-memory table.
///
/// Paths without configured tags read as "no tags".
#[derive(Debug, Default)]
pub struct MockTagReader {
    tags: Mutex<HashMap<PathBuf, RawTags>>,
    broken: Mutex<HashSet<PathBuf>>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockTagReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the raw tags returned for `path`.
    pub fn set_tags(&self, path: impl AsRef<Path>, tags: RawTags) {
        if let Ok(mut map) = self.tags.lock() {
            map.insert(path.as_ref().to_path_buf(), tags);
        }
    }

    /// Make reads of `path` fail with a malformed header.
    pub fn fail_with_header_not_found(&self, path: impl AsRef<Path>) {
        if let Ok(mut set) = self.broken.lock() {
            set.insert(path.as_ref().to_path_buf());
        }
    }

    /// Paths read so far, in order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl TagReader for MockTagReader {
    fn name(&self) -> &str {
        "mock"
    }

    fn read(&self, path: &Path) -> Result<Option<RawTags>, TagReadError> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push(path.to_path_buf());
        }

        let broken = self
            .broken
            .lock()
            .map(|set| set.contains(path))
            .unwrap_or(false);
        if broken {
            return Err(TagReadError::HeaderNotFound {
                path: path.to_path_buf(),
                reason: "mock: header not found".to_string(),
            });
        }

        Ok(self
            .tags
            .lock()
            .ok()
            .and_then(|map| map.get(path).cloned()))
    }
}
