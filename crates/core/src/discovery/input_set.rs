//! Validated input roots and the file walk over them.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::error::InputError;

/// The base directory and the de-duplicated input roots beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet {
    base_dir: PathBuf,
    roots: Vec<PathBuf>,
}

impl InputSet {
    /// Canonicalizes and validates `base_dir` and every input.
    ///
    /// Inputs nested inside another input are dropped so each file is
    /// enumerated once.
    pub fn collect(base_dir: &Path, inputs: &[PathBuf]) -> Result<Self, InputError> {
        if inputs.is_empty() {
            return Err(InputError::NoInputs);
        }

        let base_dir = base_dir
            .canonicalize()
            .map_err(|source| InputError::BaseDirMissing {
                path: base_dir.to_path_buf(),
                source,
            })?;
        if !base_dir.is_dir() {
            return Err(InputError::BaseDirNotDirectory { path: base_dir });
        }

        let mut roots = Vec::with_capacity(inputs.len());
        for input in inputs {
            let root = input
                .canonicalize()
                .map_err(|source| InputError::InputNotFound {
                    path: input.clone(),
                    source,
                })?;
            if !root.starts_with(&base_dir) {
                return Err(InputError::OutsideBase {
                    path: input.clone(),
                    base_dir,
                });
            }
            roots.push(root);
        }

        roots.sort();
        let mut kept: Vec<PathBuf> = Vec::with_capacity(roots.len());
        for root in roots {
            match kept.iter().find(|k| root.starts_with(k)) {
                Some(parent) => debug!(
                    input = %root.display(),
                    covered_by = %parent.display(),
                    "Input already covered"
                ),
                None => kept.push(root),
            }
        }

        Ok(Self {
            base_dir,
            roots: kept,
        })
    }

    /// Canonical base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Canonical input roots, sorted, none inside another.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Every file under the roots, sorted.
    ///
    /// Symlinked directories are not descended into; symlinks to files are
    /// included. Unreadable entries are logged and skipped.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for root in &self.roots {
            for entry in WalkDir::new(root).follow_links(false) {
                match entry {
                    Ok(entry) => {
                        let file_type = entry.file_type();
                        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
                            files.push(entry.into_path());
                        }
                    }
                    Err(e) => warn!("Error accessing entry: {}", e),
                }
            }
        }

        files.sort();
        files.dedup();
        files
    }

    /// [`walk`](Self::walk) on the blocking pool.
    pub async fn enumerate(&self) -> Vec<PathBuf> {
        let set = self.clone();
        match tokio::task::spawn_blocking(move || set.walk()).await {
            Ok(files) => files,
            Err(e) => {
                warn!("Directory walk failed: {}", e);
                Vec::new()
            }
        }
    }
}
