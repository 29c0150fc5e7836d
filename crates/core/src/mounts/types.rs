//! Types for the mounts module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Where the filesystem is mounted.
    pub mount_point: PathBuf,
    /// Filesystem type label (e.g. "ext4", "vfat").
    pub fs_type: String,
}

impl MountEntry {
    /// Creates a new mount entry.
    pub fn new(mount_point: impl Into<PathBuf>, fs_type: impl Into<String>) -> Self {
        Self {
            mount_point: mount_point.into(),
            fs_type: fs_type.into(),
        }
    }

    /// Whether `path` lives under this mount point.
    ///
    /// Matching is per path component, so `/mnt/usb` contains
    /// `/mnt/usb/a` but not `/mnt/usb2`.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.mount_point)
    }

    /// Length used to rank competing matches; deeper mounts win.
    pub fn specificity(&self) -> usize {
        self.mount_point.as_os_str().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_component_wise() {
        let entry = MountEntry::new("/mnt/usb", "vfat");
        assert!(entry.contains(Path::new("/mnt/usb")));
        assert!(entry.contains(Path::new("/mnt/usb/Music/a.mp3")));
        assert!(!entry.contains(Path::new("/mnt/usb2/a.mp3")));
        assert!(!entry.contains(Path::new("/home/user")));
    }

    #[test]
    fn test_root_contains_everything() {
        let entry = MountEntry::new("/", "ext4");
        assert!(entry.contains(Path::new("/anything/at/all")));
        assert_eq!(entry.specificity(), 1);
    }
}
