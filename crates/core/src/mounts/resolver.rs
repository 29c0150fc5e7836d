//! Longest-prefix filesystem type resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::MountError;
use super::traits::MountTable;

/// Resolves the filesystem type label for a path.
#[derive(Clone)]
pub struct FilesystemResolver {
    table: Arc<dyn MountTable>,
}

impl FilesystemResolver {
    /// Creates a resolver over the given mount table.
    pub fn new(table: Arc<dyn MountTable>) -> Self {
        Self { table }
    }

    /// Returns the type label of the filesystem containing `path`.
    ///
    /// The path need not exist yet. Relative paths are made absolute and
    /// the deepest existing ancestor is canonicalized so symlinks into
    /// other mounts are followed. Among mounts containing the result, the
    /// longest mount point wins; for identical mount points the one listed
    /// last (the one stacked on top) wins.
    pub async fn resolve(&self, path: &Path) -> Result<String, MountError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::path::absolute(path).map_err(|source| MountError::InvalidPath {
                path: path.to_path_buf(),
                source,
            })?
        };
        let anchored = anchor(&absolute).await;

        let entries = self.table.entries().await?;
        entries
            .into_iter()
            .filter(|entry| entry.contains(&anchored))
            .max_by_key(|entry| entry.specificity())
            .map(|entry| entry.fs_type)
            .ok_or(MountError::NoMatchingFilesystem { path: anchored })
    }
}

/// Canonicalizes the deepest existing ancestor and re-attaches the rest.
async fn anchor(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = tokio::fs::canonicalize(existing).await {
            let mut anchored = canonical;
            for component in missing.iter().rev() {
                anchored.push(component);
            }
            return anchored;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}
