//! Configuration for the mounts module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where to read the mount table from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountConfig {
    /// Path of a `/proc/mounts`-formatted table.
    #[serde(default = "default_table_path")]
    pub table_path: PathBuf,
}

fn default_table_path() -> PathBuf {
    PathBuf::from("/proc/self/mounts")
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            table_path: default_table_path(),
        }
    }
}

impl MountConfig {
    /// Sets the mount table path.
    pub fn with_table_path(mut self, path: PathBuf) -> Self {
        self.table_path = path;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MountConfig::default();
        assert_eq!(config.table_path, PathBuf::from("/proc/self/mounts"));
    }
}
