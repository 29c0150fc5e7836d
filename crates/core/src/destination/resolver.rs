//! Mirrored destination path computation.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use super::config::DestinationConfig;
use super::error::DestinationError;
use crate::mounts::FilesystemResolver;

/// Computes where each source file lands in the output tree.
#[derive(Clone)]
pub struct DestinationResolver {
    base_dir: PathBuf,
    output_root: PathBuf,
    target_extension: String,
    config: DestinationConfig,
    filesystems: FilesystemResolver,
}

impl DestinationResolver {
    /// Creates a resolver mirroring `base_dir` into `output_root`.
    pub fn new(
        base_dir: PathBuf,
        output_root: PathBuf,
        target_extension: impl Into<String>,
        config: DestinationConfig,
        filesystems: FilesystemResolver,
    ) -> Self {
        Self {
            base_dir,
            output_root,
            target_extension: target_extension.into(),
            config,
            filesystems,
        }
    }

    /// The directory every destination is placed under.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Returns the source path relative to the base directory with the
    /// extension replaced by the target extension.
    pub fn mirror(&self, source: &Path) -> Result<PathBuf, DestinationError> {
        let relative =
            source
                .strip_prefix(&self.base_dir)
                .map_err(|_| DestinationError::OutsideBase {
                    source_path: source.to_path_buf(),
                    base_dir: self.base_dir.clone(),
                })?;

        let escapes = relative.as_os_str().is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(DestinationError::EscapesOutputRoot {
                source_path: source.to_path_buf(),
            });
        }

        Ok(relative.with_extension(&self.target_extension))
    }

    /// Replaces forbidden characters in every component of `relative`.
    pub fn sanitize(&self, relative: &Path) -> PathBuf {
        relative
            .components()
            .map(|component| self.sanitize_component(component.as_os_str()))
            .collect()
    }

    fn sanitize_component(&self, name: &OsStr) -> OsString {
        match name.to_str() {
            Some(text) => OsString::from(self.config.sanitize_name(text)),
            None => self.sanitize_raw(name),
        }
    }

    #[cfg(unix)]
    fn sanitize_raw(&self, name: &OsStr) -> OsString {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        OsString::from_vec(self.config.sanitize_bytes(name.as_bytes()))
    }

    // Non-unix names that fail UTF-8 are unpaired surrogates; keep them.
    #[cfg(not(unix))]
    fn sanitize_raw(&self, name: &OsStr) -> OsString {
        name.to_os_string()
    }

    /// Resolves the full destination path for `source`.
    ///
    /// The filesystem type is looked up for the unsanitized candidate on
    /// every call; names are only rewritten when that filesystem is
    /// restricted.
    pub async fn resolve(&self, source: &Path) -> Result<PathBuf, DestinationError> {
        let relative = self.mirror(source)?;
        let candidate = self.output_root.join(&relative);
        let fs_type = self.filesystems.resolve(&candidate).await?;

        if self.config.is_restricted(&fs_type) {
            let sanitized = self.output_root.join(self.sanitize(&relative));
            trace!(
                source = %source.display(),
                fs_type = %fs_type,
                destination = %sanitized.display(),
                "Sanitized destination for restricted filesystem"
            );
            Ok(sanitized)
        } else {
            Ok(candidate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mounts::MountEntry;
    use crate::testing::StaticMountTable;
    use std::sync::Arc;

    fn resolver_on(fs_type: &str) -> DestinationResolver {
        let table = StaticMountTable::new(vec![MountEntry::new("/", fs_type)]);
        DestinationResolver::new(
            PathBuf::from("/music"),
            PathBuf::from("/zz_out"),
            "mp3",
            DestinationConfig::default(),
            FilesystemResolver::new(Arc::new(table)),
        )
    }

    #[test]
    fn test_mirror_replaces_extension() {
        let resolver = resolver_on("ext4");
        assert_eq!(
            resolver.mirror(Path::new("/music/A/song.flac")).unwrap(),
            PathBuf::from("A/song.mp3")
        );
        assert_eq!(
            resolver.mirror(Path::new("/music/B/already.mp3")).unwrap(),
            PathBuf::from("B/already.mp3")
        );
        assert_eq!(
            resolver.mirror(Path::new("/music/no_extension")).unwrap(),
            PathBuf::from("no_extension.mp3")
        );
        assert_eq!(
            resolver.mirror(Path::new("/music/Disc 1.5/01. Intro.ogg")).unwrap(),
            PathBuf::from("Disc 1.5/01. Intro.mp3")
        );
    }

    #[test]
    fn test_mirror_rejects_outside_base() {
        let resolver = resolver_on("ext4");
        let err = resolver.mirror(Path::new("/other/song.flac")).unwrap_err();
        assert!(matches!(err, DestinationError::OutsideBase { .. }));

        let err = resolver.mirror(Path::new("/musicians/song.flac")).unwrap_err();
        assert!(matches!(err, DestinationError::OutsideBase { .. }));
    }

    #[test]
    fn test_mirror_rejects_escaping_paths() {
        let resolver = resolver_on("ext4");
        let err = resolver.mirror(Path::new("/music/../etc/passwd")).unwrap_err();
        assert!(matches!(err, DestinationError::EscapesOutputRoot { .. }));

        let err = resolver.mirror(Path::new("/music")).unwrap_err();
        assert!(matches!(err, DestinationError::EscapesOutputRoot { .. }));
    }

    #[tokio::test]
    async fn test_resolve_sanitizes_on_fat() {
        let resolver = resolver_on("vfat");
        let destination = resolver
            .resolve(Path::new("/music/Who? Me*/\"Best\": Of.flac"))
            .await
            .unwrap();
        assert_eq!(destination, PathBuf::from("/zz_out/Who_ Me_/_Best__ Of.mp3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_resolve_sanitizes_non_utf8_names_on_fat() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let resolver = resolver_on("vfat");
        let source = PathBuf::from(OsString::from_vec(b"/music/Caf\xE9?: Live.flac".to_vec()));
        let destination = resolver.resolve(&source).await.unwrap();

        assert_eq!(
            destination.as_os_str().as_bytes(),
            b"/zz_out/Caf\xE9__ Live.mp3"
        );
    }

    #[tokio::test]
    async fn test_resolve_keeps_names_on_unrestricted() {
        let resolver = resolver_on("ext4");
        let destination = resolver
            .resolve(Path::new("/music/Who? Me*/\"Best\": Of.flac"))
            .await
            .unwrap();
        assert_eq!(
            destination,
            PathBuf::from("/zz_out/Who? Me*/\"Best\": Of.mp3")
        );
    }

    #[tokio::test]
    async fn test_resolve_propagates_mount_errors() {
        let table = StaticMountTable::new(vec![MountEntry::new("/somewhere/else", "ext4")]);
        let resolver = DestinationResolver::new(
            PathBuf::from("/music"),
            PathBuf::from("/zz_out"),
            "mp3",
            DestinationConfig::default(),
            FilesystemResolver::new(Arc::new(table)),
        );
        let err = resolver
            .resolve(Path::new("/music/a.flac"))
            .await
            .unwrap_err();
        assert!(matches!(err, DestinationError::Mount(_)));
    }
}
