//! Allow-list filtering and degradation around a [`TagReader`].

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use super::config::TagsConfig;
use super::error::TagReadError;
use super::traits::{RawTags, TagReader};
use super::types::{TagField, TagSet};

/// Produces the [`TagSet`] embedded into each transcoded file.
#[derive(Clone)]
pub struct TagExtractor {
    reader: Arc<dyn TagReader>,
    config: TagsConfig,
}

impl TagExtractor {
    /// Creates an extractor over `reader` keeping the configured fields.
    pub fn new(reader: Arc<dyn TagReader>, config: TagsConfig) -> Self {
        Self { reader, config }
    }

    /// Extracts tags for `path`.
    ///
    /// Reader failures are logged and produce an empty set.
    pub async fn extract(&self, path: &Path) -> TagSet {
        let reader = Arc::clone(&self.reader);
        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || reader.read(&owned)).await;

        match result {
            Ok(Ok(Some(raw))) => self.filter(&raw),
            Ok(Ok(None)) => {
                debug!(path = %path.display(), "No tags found");
                TagSet::new()
            }
            Ok(Err(TagReadError::HeaderNotFound { reason, .. })) => {
                warn!(path = %path.display(), reason = %reason, "Header not found, continuing without tags");
                TagSet::new()
            }
            Ok(Err(e @ TagReadError::Io { .. })) => {
                warn!(path = %path.display(), "{}, continuing without tags", e);
                TagSet::new()
            }
            Err(e) => {
                warn!(path = %path.display(), "Tag reader task failed: {}", e);
                TagSet::new()
            }
        }
    }

    /// Keeps allow-listed, non-empty values and derives `year`.
    pub fn filter(&self, raw: &RawTags) -> TagSet {
        let mut tags = TagSet::new();
        for (key, value) in raw {
            match TagField::from_key(key) {
                Some(field) if self.config.fields.contains(&field) => tags.insert(field, value),
                _ => {}
            }
        }
        tags.derive_year();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTagReader;

    fn raw(pairs: &[(&str, &str)]) -> RawTags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_extract_filters_and_derives_year() {
        let reader = MockTagReader::new();
        reader.set_tags(
            "/music/a.flac",
            raw(&[
                ("artist", "X"),
                ("title", "Y"),
                ("tracknumber", "3"),
                ("date", "2003-11-02"),
                ("genre", "Rock"),
                ("album", ""),
            ]),
        );
        let extractor = TagExtractor::new(Arc::new(reader), TagsConfig::default());

        let tags = extractor.extract(Path::new("/music/a.flac")).await;
        assert_eq!(tags.get(TagField::Artist), Some("X"));
        assert_eq!(tags.get(TagField::Title), Some("Y"));
        assert_eq!(tags.get(TagField::TrackNumber), Some("3"));
        assert_eq!(tags.get(TagField::Year), Some("2003"));
        assert!(!tags.contains(TagField::Album));
        assert_eq!(tags.len(), 5);
    }

    #[tokio::test]
    async fn test_extract_respects_allow_list() {
        let reader = MockTagReader::new();
        reader.set_tags("/music/a.flac", raw(&[("artist", "X"), ("title", "Y")]));
        let config = TagsConfig {
            fields: vec![TagField::Title],
        };
        let extractor = TagExtractor::new(Arc::new(reader), config);

        let tags = extractor.extract(Path::new("/music/a.flac")).await;
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get(TagField::Title), Some("Y"));
    }

    #[tokio::test]
    async fn test_extract_degrades_on_header_not_found() {
        let reader = MockTagReader::new();
        reader.fail_with_header_not_found("/music/broken.flac");
        let extractor = TagExtractor::new(Arc::new(reader), TagsConfig::default());

        let tags = extractor.extract(Path::new("/music/broken.flac")).await;
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_extract_with_lofty_on_garbage_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("garbage.flac");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let extractor = TagExtractor::new(
            Arc::new(crate::tags::LoftyTagReader::new()),
            TagsConfig::default(),
        );
        assert!(extractor.extract(&path).await.is_empty());
    }
}
