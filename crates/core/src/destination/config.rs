//! Configuration for destination path resolution.

use serde::{Deserialize, Serialize};

/// Filename restrictions applied per destination filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Filesystem type labels whose names cannot hold `forbidden_chars`.
    #[serde(default = "default_restricted_filesystems")]
    pub restricted_filesystems: Vec<String>,

    /// Characters replaced on restricted filesystems.
    #[serde(default = "default_forbidden_chars")]
    pub forbidden_chars: String,

    /// Character substituted for each forbidden one.
    #[serde(default = "default_replacement")]
    pub replacement: char,
}

fn default_restricted_filesystems() -> Vec<String> {
    ["vfat", "msdos", "fat", "exfat", "umsdos"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_forbidden_chars() -> String {
    "?*\":".to_string()
}

fn default_replacement() -> char {
    '_'
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            restricted_filesystems: default_restricted_filesystems(),
            forbidden_chars: default_forbidden_chars(),
            replacement: default_replacement(),
        }
    }
}

impl DestinationConfig {
    /// Whether names on `fs_type` must be sanitized.
    pub fn is_restricted(&self, fs_type: &str) -> bool {
        self.restricted_filesystems
            .iter()
            .any(|restricted| restricted.eq_ignore_ascii_case(fs_type))
    }

    /// Replaces every forbidden character in `name`.
    pub fn sanitize_name(&self, name: &str) -> String {
        name.chars()
            .map(|c| {
                if self.forbidden_chars.contains(c) {
                    self.replacement
                } else {
                    c
                }
            })
            .collect()
    }

    /// Byte-level form of [`DestinationConfig::sanitize_name`] for names
    /// that are not valid UTF-8.
    ///
    /// Valid runs are sanitized like text; invalid bytes pass through.
    pub fn sanitize_bytes(&self, name: &[u8]) -> Vec<u8> {
        let mut sanitized = Vec::with_capacity(name.len());
        for chunk in name.utf8_chunks() {
            sanitized.extend_from_slice(self.sanitize_name(chunk.valid()).as_bytes());
            sanitized.extend_from_slice(chunk.invalid());
        }
        sanitized
    }

    /// Sets the restricted filesystem list.
    pub fn with_restricted_filesystems(mut self, filesystems: Vec<String>) -> Self {
        self.restricted_filesystems = filesystems;
        self
    }
}
