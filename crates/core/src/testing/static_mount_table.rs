//! Fixed mount table for testing.

use async_trait::async_trait;

use crate::mounts::{MountEntry, MountError, MountTable};

/// Mount table returning a fixed list of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticMountTable {
    entries: Vec<MountEntry>,
}

impl StaticMountTable {
    pub fn new(entries: Vec<MountEntry>) -> Self {
        Self { entries }
    }

    /// Table with a single root mount of the given type.
    pub fn root(fs_type: &str) -> Self {
        Self::new(vec![MountEntry::new("/", fs_type)])
    }
}

#[async_trait]
impl MountTable for StaticMountTable {
    fn name(&self) -> &str {
        "static"
    }

    async fn entries(&self) -> Result<Vec<MountEntry>, MountError> {
        Ok(self.entries.clone())
    }
}
